use {
    alloy::{
        primitives::{Address, Bytes, U256},
        sol_types::SolCall,
    },
    contracts::{
        IERC20,
        ISwapRouter::{self, ISwapRouterCalls},
        NATIVE_TOKEN,
    },
    ledger::{Context, Contract, Ledger, Revert, decode},
    number::{WAD, mul_div},
    std::collections::HashMap,
};

/// Swap router quoting fixed exchange rates out of its own inventory.
///
/// Rates are 18 decimal fixed point amounts of `tokenOut` per unit of
/// `tokenIn`. The native currency is addressed as [`NATIVE_TOKEN`].
#[derive(Clone, Debug, Default)]
pub struct SwapRouter {
    rates: HashMap<(Address, Address), U256>,
}

impl SwapRouter {
    pub fn with_rate(mut self, token_in: Address, token_out: Address, rate: U256) -> Self {
        self.rates.insert((token_in, token_out), rate);
        self
    }

    /// Registers `rate` for `a -> b` and its inverse for `b -> a`.
    pub fn with_pair(self, a: Address, b: Address, rate: U256) -> Self {
        let inverse = mul_div(WAD, WAD, rate).unwrap_or_default();
        self.with_rate(a, b, rate).with_rate(b, a, inverse)
    }

    pub fn quote(&self, token_in: Address, token_out: Address, amount_in: U256) -> Option<U256> {
        let rate = self.rates.get(&(token_in, token_out))?;
        mul_div(amount_in, *rate, WAD)
    }

    fn swap(
        &self,
        ledger: &mut Ledger,
        ctx: &Context,
        call: ISwapRouter::swapCall,
    ) -> Result<U256, Revert> {
        let amount_out = self
            .quote(call.tokenIn, call.tokenOut, call.amountIn)
            .ok_or_else(|| Revert::new("unsupported pair"))?;
        if amount_out < call.minAmountOut {
            return Err(Revert::new("insufficient output amount"));
        }

        if call.tokenIn == NATIVE_TOKEN {
            if ctx.value != call.amountIn {
                return Err(Revert::new("value does not match amount in"));
            }
        } else {
            ctx.ensure_not_payable()?;
            let pull = IERC20::transferFromCall {
                from: ctx.sender,
                to: ctx.this,
                amount: call.amountIn,
            };
            ledger.call_sol(ctx.this, call.tokenIn, U256::ZERO, &pull)?;
        }

        if call.tokenOut == NATIVE_TOKEN {
            ledger.send_native(ctx.this, ctx.sender, amount_out)?;
        } else {
            let pay = IERC20::transferCall {
                to: ctx.sender,
                amount: amount_out,
            };
            ledger.call_sol(ctx.this, call.tokenOut, U256::ZERO, &pay)?;
        }

        tracing::trace!(
            token_in = ?call.tokenIn,
            token_out = ?call.tokenOut,
            amount_in = %call.amountIn,
            %amount_out,
            "swapped"
        );
        Ok(amount_out)
    }
}

impl Contract for SwapRouter {
    fn call(&self, ledger: &mut Ledger, ctx: Context, input: &[u8]) -> Result<Bytes, Revert> {
        if input.is_empty() {
            // inventory top ups
            return Ok(Bytes::new());
        }
        match decode::<ISwapRouterCalls>(input)? {
            ISwapRouterCalls::swap(call) => {
                let amount_out = self.swap(ledger, &ctx, call)?;
                Ok(ISwapRouter::swapCall::abi_encode_returns(&amount_out).into())
            }
        }
    }
}
