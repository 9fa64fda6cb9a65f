//! Caller side of a conversion: where quotes and conversion instructions
//! come from and how the price fed to the resolver is refined until the
//! swap amount settles.

pub mod converge;
pub mod oneinch;
pub mod provider;

pub use {
    converge::{Converged, Error, Plan, converge, plan, prepare},
    provider::{ConversionProvider, QuoteQuery, Swap, SwapQuery},
};
