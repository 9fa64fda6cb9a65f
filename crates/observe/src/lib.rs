//! This crate contains the code that makes the router observable:
//! initialization of logging and of the metrics registry.
pub mod config;
pub mod metrics;
pub mod tracing;

pub use config::Config;
