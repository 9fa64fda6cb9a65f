use {
    crate::{Error, Router, pool::Asset},
    alloy::primitives::{Address, U256},
    contracts::{IERC20, IWETH9},
    ledger::{Ledger, Revert, erc20},
};

impl Router {
    /// Moves the native value attached to an operation to the router.
    pub(crate) fn receive_value(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        value: U256,
    ) -> Result<(), Error> {
        if value.is_zero() {
            return Ok(());
        }
        ledger
            .send_native(caller, self.address, value)
            .map_err(|reason| Error::TransferFailed {
                asset: Asset::Native,
                reason,
            })
    }

    pub(crate) fn pull(
        &self,
        ledger: &mut Ledger,
        token: Address,
        from: Address,
        amount: U256,
    ) -> Result<(), Error> {
        if amount.is_zero() {
            return Ok(());
        }
        let call = IERC20::transferFromCall {
            from,
            to: self.address,
            amount,
        };
        let success = ledger.call_sol(self.address, token, U256::ZERO, &call);
        checked(token, success)
    }

    pub(crate) fn pay(
        &self,
        ledger: &mut Ledger,
        token: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), Error> {
        if amount.is_zero() {
            return Ok(());
        }
        let success = ledger.call_sol(
            self.address,
            token,
            U256::ZERO,
            &IERC20::transferCall { to, amount },
        );
        checked(token, success)
    }

    pub(crate) fn approve(
        &self,
        ledger: &mut Ledger,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<(), Error> {
        let success = ledger.call_sol(
            self.address,
            token,
            U256::ZERO,
            &IERC20::approveCall { spender, amount },
        );
        checked(token, success)
    }

    /// Wraps every bit of native currency the router holds.
    pub(crate) fn wrap_all(&self, ledger: &mut Ledger) -> Result<(), Error> {
        let amount = ledger.native_balance(self.address);
        if amount.is_zero() {
            return Ok(());
        }
        ledger
            .call_sol(self.address, self.weth, amount, &IWETH9::depositCall {})
            .map_err(|reason| Error::TransferFailed {
                asset: Asset::Native,
                reason,
            })?;
        tracing::debug!(%amount, "wrapped native currency");
        Ok(())
    }

    /// Unwraps `amount` of the wrapped native currency and sends it to `to`.
    pub(crate) fn pay_native(
        &self,
        ledger: &mut Ledger,
        to: Address,
        amount: U256,
    ) -> Result<(), Error> {
        if amount.is_zero() {
            return Ok(());
        }
        ledger
            .call_sol(
                self.address,
                self.weth,
                U256::ZERO,
                &IWETH9::withdrawCall { amount },
            )
            .map_err(|reason| Error::TransferFailed {
                asset: Asset::Token(self.weth),
                reason,
            })?;
        ledger
            .send_native(self.address, to, amount)
            .map_err(|reason| Error::NativeTransferFailed {
                recipient: to,
                reason,
            })
    }

    /// What the router holds of `token`, counting native currency as the
    /// wrapped native token.
    pub(crate) fn holdings(&self, ledger: &Ledger, token: Address) -> U256 {
        let balance = erc20::balance_of(ledger, token, self.address);
        if token == self.weth {
            balance.saturating_add(ledger.native_balance(self.address))
        } else {
            balance
        }
    }
}

/// Treats a token call returning `false` like a revert.
fn checked(token: Address, result: Result<bool, Revert>) -> Result<(), Error> {
    match result {
        Ok(true) => Ok(()),
        Ok(false) => Err(Error::TransferFailed {
            asset: Asset::Token(token),
            reason: Revert::new("token returned false"),
        }),
        Err(reason) => Err(Error::TransferFailed {
            asset: Asset::Token(token),
            reason,
        }),
    }
}
