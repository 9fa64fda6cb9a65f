use {
    crate::{Error, pool::Asset},
    alloy::primitives::{Address, U256},
    ledger::{Ledger, erc20},
};

/// Asserts the router holds nothing once an operation is over.
///
/// Created when an operation starts, after the attached native value was
/// received, and settled right before it returns.
#[derive(Debug)]
#[must_use]
pub struct BalanceGuard {
    router: Address,
    tokens: Vec<Address>,
}

impl BalanceGuard {
    /// Checks that the router starts clean: no balance of any of `tokens`
    /// and exactly `value` native currency.
    pub fn enter(
        ledger: &Ledger,
        router: Address,
        tokens: impl IntoIterator<Item = Address>,
        value: U256,
    ) -> Result<Self, Error> {
        let mut tokens: Vec<_> = tokens.into_iter().collect();
        tokens.sort();
        tokens.dedup();
        let guard = Self { router, tokens };

        let native = ledger.native_balance(router);
        if native != value {
            return Err(Error::ResidualBalance {
                asset: Asset::Native,
                amount: native.saturating_sub(value),
            });
        }
        guard.check_tokens(ledger)?;
        Ok(guard)
    }

    /// Checks that the router ends clean: no balance of any asset.
    pub fn settle(self, ledger: &Ledger) -> Result<(), Error> {
        let native = ledger.native_balance(self.router);
        if !native.is_zero() {
            tracing::error!(router = ?self.router, %native, "router kept native currency");
            return Err(Error::ResidualBalance {
                asset: Asset::Native,
                amount: native,
            });
        }
        self.check_tokens(ledger)
    }

    fn check_tokens(&self, ledger: &Ledger) -> Result<(), Error> {
        for token in &self.tokens {
            let amount = erc20::balance_of(ledger, *token, self.router);
            if !amount.is_zero() {
                tracing::error!(router = ?self.router, ?token, %amount, "router kept tokens");
                return Err(Error::ResidualBalance {
                    asset: Asset::Token(*token),
                    amount,
                });
            }
        }
        Ok(())
    }
}
