use crate::Error;

/// Metrics for the router.
#[derive(prometheus_metric_storage::MetricStorage)]
#[metric(subsystem = "router")]
pub struct Metrics {
    /// Router operations by entry point and result.
    #[metric(labels("operation", "result"))]
    pub operations: prometheus::IntCounterVec,
    /// Calls executed on behalf of conversion instructions.
    pub executed_calls: prometheus::IntCounter,
}

/// Prefix of all metric names.
pub const PREFIX: &str = "vault";

/// Setup the metrics registry. Later calls are ignored.
pub fn init() {
    observe::metrics::setup_registry_reentrant(Some(PREFIX.to_owned()), None);
}

/// Get the metrics instance.
pub fn get() -> &'static Metrics {
    Metrics::instance(observe::metrics::get_storage_registry())
        .expect("unexpected error getting metrics instance")
}

pub(crate) fn operation<T>(operation: &str, result: &Result<T, Error>) {
    let label = match result {
        Ok(_) => "success",
        Err(err) => err.kind(),
    };
    get().operations.with_label_values(&[operation, label]).inc();
}
