use {
    crate::{
        BalanceGuard,
        Error,
        Router,
        metrics,
        pool::{Pool, Side},
    },
    alloy::primitives::{Address, U256},
    contracts::IVaultPool,
    ledger::Ledger,
    tracing::instrument,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawalInstruction {
    pub pool: Address,
    pub claim_amount: U256,
    pub min_amount0_out: U256,
    pub min_amount1_out: U256,
    pub recipient: Address,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawalOutcome {
    pub amount0: U256,
    pub amount1: U256,
    pub claim_burned: U256,
}

impl Router {
    /// Burns the caller's claim tokens and sends both assets to the
    /// recipient.
    #[instrument(name = "remove_liquidity", skip_all, fields(pool = ?instruction.pool, ?caller))]
    pub fn remove_liquidity(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        instruction: &WithdrawalInstruction,
    ) -> Result<WithdrawalOutcome, Error> {
        self.withdraw(ledger, caller, instruction, false)
    }

    /// Like [`Router::remove_liquidity`] but the wrapped native side is
    /// unwrapped and sent as native currency. A recipient rejecting it fails
    /// the whole withdrawal.
    #[instrument(
        name = "remove_liquidity_native",
        skip_all,
        fields(pool = ?instruction.pool, ?caller)
    )]
    pub fn remove_liquidity_native(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        instruction: &WithdrawalInstruction,
    ) -> Result<WithdrawalOutcome, Error> {
        self.withdraw(ledger, caller, instruction, true)
    }

    fn withdraw(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        instruction: &WithdrawalInstruction,
        unwrap_to_native: bool,
    ) -> Result<WithdrawalOutcome, Error> {
        let result = ledger
            .transact(|ledger| self.try_withdraw(ledger, caller, instruction, unwrap_to_native));
        match &result {
            Ok(outcome) => tracing::info!(?outcome, "withdrew"),
            Err(err) => tracing::warn!(?err, "withdrawal failed"),
        }
        let operation = if unwrap_to_native {
            "remove_liquidity_native"
        } else {
            "remove_liquidity"
        };
        metrics::operation(operation, &result);
        result
    }

    fn try_withdraw(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        instruction: &WithdrawalInstruction,
        unwrap_to_native: bool,
    ) -> Result<WithdrawalOutcome, Error> {
        let pool = Pool::read(ledger, instruction.pool)?;
        let native_side = if unwrap_to_native {
            Some(pool.native_side(self.weth)?)
        } else {
            None
        };
        let guard = BalanceGuard::enter(
            ledger,
            self.address,
            [pool.token0, pool.token1, pool.address, self.weth],
            U256::ZERO,
        )?;

        self.pull(ledger, pool.address, caller, instruction.claim_amount)?;
        let burned = ledger
            .call_sol(
                self.address,
                pool.address,
                U256::ZERO,
                &IVaultPool::burnCall {
                    burnAmount: instruction.claim_amount,
                    receiver: self.address,
                },
            )
            .map_err(Error::Pool)?;

        for (token, out, minimum) in [
            (pool.token0, burned.amount0, instruction.min_amount0_out),
            (pool.token1, burned.amount1, instruction.min_amount1_out),
        ] {
            if out < minimum {
                return Err(Error::SlippageExceeded {
                    token,
                    used: out,
                    minimum,
                });
            }
        }

        let amounts = (burned.amount0, burned.amount1);
        for side in [Side::Zero, Side::One] {
            let amount = side.pick(amounts);
            if native_side == Some(side) {
                self.pay_native(ledger, instruction.recipient, amount)?;
            } else {
                self.pay(ledger, pool.token(side), instruction.recipient, amount)?;
            }
        }

        guard.settle(ledger)?;
        Ok(WithdrawalOutcome {
            amount0: burned.amount0,
            amount1: burned.amount1,
            claim_burned: instruction.claim_amount,
        })
    }
}
