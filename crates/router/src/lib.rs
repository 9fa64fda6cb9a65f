//! Routes deposits into and withdrawals out of two asset vault positions.
//!
//! The [`resolver`] computes how much of the excess asset a depositor has to
//! convert so that a deposit fits the position's ratio. The [`Router`] then
//! executes the conversion instruction the caller obtained from an external
//! provider, mints, refunds what the pool did not take and asserts via the
//! [`BalanceGuard`] that it holds nothing afterwards. Every entry point runs
//! as one atomic ledger transaction.

pub mod config;
pub mod deposit;
pub mod error;
pub mod executor;
pub mod guard;
pub mod metrics;
pub mod pool;
pub mod resolver;
#[cfg(test)]
mod testing;
mod transfer;
pub mod withdrawal;

pub use {
    deposit::{AssetMode, Conversion, DepositInstruction, DepositOutcome},
    error::Error,
    executor::{AllowList, ConversionInstruction},
    guard::BalanceGuard,
    resolver::{MintAmounts, RebalanceRequest, RebalanceResult},
    withdrawal::{WithdrawalInstruction, WithdrawalOutcome},
};
use {
    alloy::primitives::{Address, U256},
    ledger::Ledger,
};

/// Sets up logging as configured and the global metrics registry.
///
/// # Panics
///
/// Panics if logging or metrics were already set up in this process.
pub fn initialize(config: &config::Config) {
    observe::tracing::initialize(&config.logging);
    observe::metrics::setup_registry(Some(metrics::PREFIX.to_owned()), None);
    tracing::info!(router = ?config.router, "initialized");
}

/// The router account. It keeps no state between operations; all it knows
/// is its own address, the wrapped native currency and which conversion
/// providers it may call.
#[derive(Clone, Debug)]
pub struct Router {
    address: Address,
    weth: Address,
    allowed_targets: AllowList,
}

impl Router {
    pub fn new(address: Address, weth: Address) -> Self {
        Self {
            address,
            weth,
            allowed_targets: AllowList::default(),
        }
    }

    pub fn from_config(config: &config::Config) -> Self {
        Self::new(config.router, config.wrapped_native)
            .with_allowed_targets(config.allowed_targets.iter().copied())
    }

    /// Restricts conversion calls to `targets` and the assets of the
    /// position being operated on.
    pub fn with_allowed_targets(mut self, targets: impl IntoIterator<Item = Address>) -> Self {
        self.allowed_targets = AllowList::new(targets);
        self
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn weth(&self) -> Address {
        self.weth
    }

    pub fn rebalance_params(
        &self,
        ledger: &mut Ledger,
        pool: Address,
        request: &RebalanceRequest,
    ) -> Result<RebalanceResult, Error> {
        resolver::rebalance_params(ledger, pool, request)
    }

    pub fn pool_underlying_balances(
        &self,
        ledger: &mut Ledger,
        pool: Address,
    ) -> Result<(U256, U256), Error> {
        resolver::pool_underlying_balances(ledger, pool)
    }

    pub fn underlying_balances(
        &self,
        ledger: &mut Ledger,
        pool: Address,
        shares: U256,
    ) -> Result<(U256, U256), Error> {
        resolver::underlying_balances(ledger, pool, shares)
    }

    pub fn mint_amounts(
        &self,
        ledger: &mut Ledger,
        pool: Address,
        amount0_max: U256,
        amount1_max: U256,
    ) -> Result<MintAmounts, Error> {
        resolver::mint_amounts(ledger, pool, amount0_max, amount1_max)
    }
}
