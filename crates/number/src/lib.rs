//! Fixed-point helpers shared by the router and its callers.
//!
//! All amounts are raw token base units held in [`U256`]. Prices are 18
//! decimal fixed point numbers (see [`WAD`]) and slippage tolerances are
//! expressed in basis points (see [`Bps`]).
//!
//! [`U256`]: alloy::primitives::U256

pub mod bps;
pub mod math;
pub mod serialization;

pub use {
    bps::Bps,
    math::{U768, WAD, mul_div, mul_div_ceil, narrow, widen},
};
