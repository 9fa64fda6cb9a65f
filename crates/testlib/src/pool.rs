//! Reference vault pool.
//!
//! Holds its reserves as plain token balances of the pool address and issues
//! claim tokens proportionally: minting uses the smaller of the two
//! proportional amounts and rounds the used amounts up, burning pays out
//! rounded down. The pool address is also the claim token.

use {
    alloy::{
        primitives::{Address, Bytes, U256},
        sol_types::SolCall,
    },
    contracts::{
        IERC20,
        IVaultPool::{self, IVaultPoolCalls},
    },
    ledger::{Context, Contract, Ledger, Revert, decode, erc20, selects},
    number::{mul_div, mul_div_ceil},
};

#[derive(Debug)]
pub struct VaultPool {
    pub token0: Address,
    pub token1: Address,
}

/// Amounts taken from the depositor and the claim minted for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintAmounts {
    pub amount0: U256,
    pub amount1: U256,
    pub mint_amount: U256,
}

impl VaultPool {
    pub fn new(token0: Address, token1: Address) -> Self {
        Self { token0, token1 }
    }

    fn reserves(&self, ledger: &Ledger, this: Address) -> (U256, U256) {
        (
            erc20::balance_of(ledger, self.token0, this),
            erc20::balance_of(ledger, self.token1, this),
        )
    }

    pub fn mint_amounts(
        &self,
        ledger: &Ledger,
        this: Address,
        amount0_max: U256,
        amount1_max: U256,
    ) -> Result<MintAmounts, Revert> {
        let supply = erc20::total_supply(ledger, this);
        let (reserve0, reserve1) = self.reserves(ledger, this);

        if supply.is_zero() {
            return Ok(MintAmounts {
                amount0: amount0_max,
                amount1: amount1_max,
                mint_amount: amount0_max.max(amount1_max),
            });
        }

        let overflow = || Revert::new("mint amount overflow");
        let mint_amount = match (reserve0.is_zero(), reserve1.is_zero()) {
            (true, true) => return Err(Revert::new("pool has no reserves")),
            (true, false) => mul_div(amount1_max, supply, reserve1).ok_or_else(overflow)?,
            (false, true) => mul_div(amount0_max, supply, reserve0).ok_or_else(overflow)?,
            (false, false) => {
                let mint0 = mul_div(amount0_max, supply, reserve0).ok_or_else(overflow)?;
                let mint1 = mul_div(amount1_max, supply, reserve1).ok_or_else(overflow)?;
                if mint0.is_zero() || mint1.is_zero() {
                    return Err(Revert::new("mint 0"));
                }
                mint0.min(mint1)
            }
        };

        Ok(MintAmounts {
            amount0: mul_div_ceil(mint_amount, reserve0, supply).ok_or_else(overflow)?,
            amount1: mul_div_ceil(mint_amount, reserve1, supply).ok_or_else(overflow)?,
            mint_amount,
        })
    }

    fn mint(
        &self,
        ledger: &mut Ledger,
        ctx: &Context,
        call: IVaultPool::mintCall,
    ) -> Result<IVaultPool::mintReturn, Revert> {
        let amounts = self.mint_amounts(ledger, ctx.this, call.amount0Max, call.amount1Max)?;
        if amounts.mint_amount.is_zero() {
            return Err(Revert::new("mint 0"));
        }
        self.pull(ledger, ctx, self.token0, amounts.amount0)?;
        self.pull(ledger, ctx, self.token1, amounts.amount1)?;
        erc20::mint(ledger, ctx.this, call.receiver, amounts.mint_amount)?;
        tracing::trace!(pool = ?ctx.this, ?amounts, "minted");
        Ok(IVaultPool::mintReturn {
            amount0: amounts.amount0,
            amount1: amounts.amount1,
            mintAmount: amounts.mint_amount,
        })
    }

    fn burn(
        &self,
        ledger: &mut Ledger,
        ctx: &Context,
        call: IVaultPool::burnCall,
    ) -> Result<IVaultPool::burnReturn, Revert> {
        if call.burnAmount.is_zero() {
            return Err(Revert::new("burn 0"));
        }
        let supply = erc20::total_supply(ledger, ctx.this);
        let (reserve0, reserve1) = self.reserves(ledger, ctx.this);
        erc20::burn(ledger, ctx.this, ctx.sender, call.burnAmount)?;

        let overflow = || Revert::new("burn amount overflow");
        let amount0 = mul_div(reserve0, call.burnAmount, supply).ok_or_else(overflow)?;
        let amount1 = mul_div(reserve1, call.burnAmount, supply).ok_or_else(overflow)?;
        self.pay(ledger, ctx.this, self.token0, call.receiver, amount0)?;
        self.pay(ledger, ctx.this, self.token1, call.receiver, amount1)?;
        tracing::trace!(pool = ?ctx.this, %amount0, %amount1, "burned");
        Ok(IVaultPool::burnReturn { amount0, amount1 })
    }

    fn pull(
        &self,
        ledger: &mut Ledger,
        ctx: &Context,
        token: Address,
        amount: U256,
    ) -> Result<(), Revert> {
        if amount.is_zero() {
            return Ok(());
        }
        let pull = IERC20::transferFromCall {
            from: ctx.sender,
            to: ctx.this,
            amount,
        };
        ledger.call_sol(ctx.this, token, U256::ZERO, &pull)?;
        Ok(())
    }

    fn pay(
        &self,
        ledger: &mut Ledger,
        this: Address,
        token: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), Revert> {
        if amount.is_zero() {
            return Ok(());
        }
        ledger.call_sol(this, token, U256::ZERO, &IERC20::transferCall { to, amount })?;
        Ok(())
    }
}

impl Contract for VaultPool {
    fn call(&self, ledger: &mut Ledger, ctx: Context, input: &[u8]) -> Result<Bytes, Revert> {
        if !selects::<IVaultPoolCalls>(input) {
            return erc20::dispatch(ledger, &ctx, decode(input)?);
        }
        ctx.ensure_not_payable()?;
        let output = match decode::<IVaultPoolCalls>(input)? {
            IVaultPoolCalls::token0(_) => IVaultPool::token0Call::abi_encode_returns(&self.token0),
            IVaultPoolCalls::token1(_) => IVaultPool::token1Call::abi_encode_returns(&self.token1),
            IVaultPoolCalls::getUnderlyingBalances(_) => {
                let (reserve0, reserve1) = self.reserves(ledger, ctx.this);
                IVaultPool::getUnderlyingBalancesCall::abi_encode_returns(
                    &IVaultPool::getUnderlyingBalancesReturn {
                        amount0Current: reserve0,
                        amount1Current: reserve1,
                    },
                )
            }
            IVaultPoolCalls::getMintAmounts(call) => {
                let amounts =
                    self.mint_amounts(ledger, ctx.this, call.amount0Max, call.amount1Max)?;
                IVaultPool::getMintAmountsCall::abi_encode_returns(
                    &IVaultPool::getMintAmountsReturn {
                        amount0: amounts.amount0,
                        amount1: amounts.amount1,
                        mintAmount: amounts.mint_amount,
                    },
                )
            }
            IVaultPoolCalls::mint(call) => {
                let ret = self.mint(ledger, &ctx, call)?;
                IVaultPool::mintCall::abi_encode_returns(&ret)
            }
            IVaultPoolCalls::burn(call) => {
                let ret = self.burn(ledger, &ctx, call)?;
                IVaultPool::burnCall::abi_encode_returns(&ret)
            }
        };
        Ok(output.into())
    }
}
