//! Deposits into a position, optionally converting part of the excess asset
//! first.
//!
//! All four entry points run the same pipeline:
//! receive value, pull, convert, wrap, approve, mint, revoke, refund. They
//! only differ in how the wrapped native side is funded ([`AssetMode`]) and
//! whether a [`Conversion`] runs.

use {
    crate::{
        BalanceGuard,
        ConversionInstruction,
        Error,
        Router,
        executor,
        metrics,
        pool::{Pool, Side},
    },
    alloy::primitives::{Address, U256},
    contracts::IVaultPool,
    ledger::{Ledger, erc20},
    tracing::instrument,
};

/// How the caller provides and receives the wrapped native side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetMode {
    /// Both assets move as ERC20 tokens.
    Erc20,
    /// The wrapped native side arrives as attached native value and refunds
    /// of it leave as native currency.
    Native,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositInstruction {
    pub pool: Address,
    pub amount0_in: U256,
    pub amount1_in: U256,
    pub min_amount0_used: U256,
    pub min_amount1_used: U256,
    /// Receives the minted claim tokens. Refunds go to the caller.
    pub recipient: Address,
}

/// A conversion of the excess asset, as computed by the resolver and built
/// by a conversion provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
    pub zero_for_one: bool,
    /// Upper bound of what the instruction may spend of the source asset.
    pub swap_amount: U256,
    pub instruction: ConversionInstruction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositOutcome {
    pub amount0_used: U256,
    pub amount1_used: U256,
    pub claim_minted: U256,
    pub refund0: U256,
    pub refund1: U256,
}

impl Router {
    #[instrument(name = "add_liquidity", skip_all, fields(pool = ?instruction.pool, ?caller))]
    pub fn add_liquidity(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        instruction: &DepositInstruction,
    ) -> Result<DepositOutcome, Error> {
        self.deposit(ledger, caller, U256::ZERO, AssetMode::Erc20, instruction, None)
    }

    /// Like [`Router::add_liquidity`] but the wrapped native side is paid
    /// with the attached `value`.
    #[instrument(
        name = "add_liquidity_native",
        skip_all,
        fields(pool = ?instruction.pool, ?caller, %value)
    )]
    pub fn add_liquidity_native(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        value: U256,
        instruction: &DepositInstruction,
    ) -> Result<DepositOutcome, Error> {
        self.deposit(ledger, caller, value, AssetMode::Native, instruction, None)
    }

    #[instrument(
        name = "rebalance_and_add_liquidity",
        skip_all,
        fields(pool = ?instruction.pool, ?caller)
    )]
    pub fn rebalance_and_add_liquidity(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        instruction: &DepositInstruction,
        conversion: &Conversion,
    ) -> Result<DepositOutcome, Error> {
        self.deposit(
            ledger,
            caller,
            U256::ZERO,
            AssetMode::Erc20,
            instruction,
            Some(conversion),
        )
    }

    /// Converts and deposits with the wrapped native side paid as attached
    /// `value`. If the native side is in excess the conversion is funded with
    /// native currency attached to the instruction's last call.
    #[instrument(
        name = "rebalance_and_add_liquidity_native",
        skip_all,
        fields(pool = ?instruction.pool, ?caller, %value)
    )]
    pub fn rebalance_and_add_liquidity_native(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        value: U256,
        instruction: &DepositInstruction,
        conversion: &Conversion,
    ) -> Result<DepositOutcome, Error> {
        self.deposit(
            ledger,
            caller,
            value,
            AssetMode::Native,
            instruction,
            Some(conversion),
        )
    }

    fn deposit(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        value: U256,
        mode: AssetMode,
        instruction: &DepositInstruction,
        conversion: Option<&Conversion>,
    ) -> Result<DepositOutcome, Error> {
        let result = ledger.transact(|ledger| {
            self.try_deposit(ledger, caller, value, mode, instruction, conversion)
        });
        match &result {
            Ok(outcome) => tracing::info!(?outcome, "deposited"),
            Err(err) => tracing::warn!(?err, "deposit failed"),
        }
        let operation = match (mode, conversion.is_some()) {
            (AssetMode::Erc20, false) => "add_liquidity",
            (AssetMode::Native, false) => "add_liquidity_native",
            (AssetMode::Erc20, true) => "rebalance_and_add_liquidity",
            (AssetMode::Native, true) => "rebalance_and_add_liquidity_native",
        };
        metrics::operation(operation, &result);
        result
    }

    fn try_deposit(
        &self,
        ledger: &mut Ledger,
        caller: Address,
        value: U256,
        mode: AssetMode,
        instruction: &DepositInstruction,
        conversion: Option<&Conversion>,
    ) -> Result<DepositOutcome, Error> {
        let pool = Pool::read(ledger, instruction.pool)?;
        let amounts_in = (instruction.amount0_in, instruction.amount1_in);
        let native_side = match mode {
            AssetMode::Erc20 => None,
            AssetMode::Native => Some(pool.native_side(self.weth)?),
        };
        let expected_value = native_side
            .map(|side| side.pick(amounts_in))
            .unwrap_or_default();
        if value != expected_value {
            return Err(Error::WrongValueSent {
                expected: expected_value,
                actual: value,
            });
        }

        self.receive_value(ledger, caller, value)?;
        let guard = BalanceGuard::enter(
            ledger,
            self.address,
            [pool.token0, pool.token1, pool.address, self.weth],
            value,
        )?;

        for side in [Side::Zero, Side::One] {
            if native_side != Some(side) {
                self.pull(ledger, pool.token(side), caller, side.pick(amounts_in))?;
            }
        }
        if let Some(conversion) = conversion {
            self.convert(ledger, &pool, native_side, conversion)?;
        }
        self.wrap_all(ledger)?;

        let available = (
            erc20::balance_of(ledger, pool.token0, self.address),
            erc20::balance_of(ledger, pool.token1, self.address),
        );
        self.approve(ledger, pool.token0, pool.address, available.0)?;
        self.approve(ledger, pool.token1, pool.address, available.1)?;
        let minted = ledger
            .call_sol(
                self.address,
                pool.address,
                U256::ZERO,
                &IVaultPool::mintCall {
                    amount0Max: available.0,
                    amount1Max: available.1,
                    receiver: instruction.recipient,
                },
            )
            .map_err(Error::Pool)?;
        tracing::debug!(
            amount0 = %minted.amount0,
            amount1 = %minted.amount1,
            claim = %minted.mintAmount,
            "minted"
        );

        for (token, used, minimum) in [
            (pool.token0, minted.amount0, instruction.min_amount0_used),
            (pool.token1, minted.amount1, instruction.min_amount1_used),
        ] {
            if used < minimum {
                return Err(Error::SlippageExceeded {
                    token,
                    used,
                    minimum,
                });
            }
        }

        self.approve(ledger, pool.token0, pool.address, U256::ZERO)?;
        self.approve(ledger, pool.token1, pool.address, U256::ZERO)?;

        let refunds = (
            available
                .0
                .checked_sub(minted.amount0)
                .ok_or(Error::Overflow)?,
            available
                .1
                .checked_sub(minted.amount1)
                .ok_or(Error::Overflow)?,
        );
        for side in [Side::Zero, Side::One] {
            let refund = side.pick(refunds);
            if native_side == Some(side) {
                self.pay_native(ledger, caller, refund)?;
            } else {
                self.pay(ledger, pool.token(side), caller, refund)?;
            }
        }

        guard.settle(ledger)?;
        Ok(DepositOutcome {
            amount0_used: minted.amount0,
            amount1_used: minted.amount1,
            claim_minted: minted.mintAmount,
            refund0: refunds.0,
            refund1: refunds.1,
        })
    }

    fn convert(
        &self,
        ledger: &mut Ledger,
        pool: &Pool,
        native_side: Option<Side>,
        conversion: &Conversion,
    ) -> Result<(), Error> {
        let source = if conversion.zero_for_one {
            Side::Zero
        } else {
            Side::One
        };
        let (source_token, target_token) = (pool.token(source), pool.token(source.other()));
        let value = if native_side == Some(source) {
            conversion.swap_amount
        } else {
            U256::ZERO
        };

        let source_before = self.holdings(ledger, source_token);
        let target_before = self.holdings(ledger, target_token);
        executor::execute(
            ledger,
            self.address,
            &conversion.instruction,
            &self.allowed_targets,
            &[pool.token0, pool.token1, self.weth],
            value,
        )?;
        let spent = source_before.saturating_sub(self.holdings(ledger, source_token));
        let received = self
            .holdings(ledger, target_token)
            .saturating_sub(target_before);

        if spent > conversion.swap_amount || received.is_zero() {
            return Err(Error::SwapAmountMismatch {
                spent,
                swap_amount: conversion.swap_amount,
                received,
            });
        }
        tracing::debug!(?source_token, %spent, %received, "converted");
        Ok(())
    }
}
