//! Fixtures shared by the end to end scenarios in `tests/e2e`.

mod provider;
mod setup;

pub use {
    provider::LocalProvider,
    setup::{Fixture, to_wei},
};

/// Sets up logging and metrics once per test binary.
pub fn init() {
    observe::tracing::initialize_reentrant("warn,router=debug,conversion=debug,e2e=debug");
    router::metrics::init();
}
