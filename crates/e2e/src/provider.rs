use {
    alloy::{
        primitives::{Address, U256},
        sol_types::SolCall,
    },
    anyhow::{Context, Result},
    contracts::{IERC20, ISwapRouter, NATIVE_TOKEN},
    conversion::{ConversionProvider, QuoteQuery, Swap, SwapQuery},
    router::ConversionInstruction,
    testlib::SwapRouter,
};

/// Conversion provider quoting and routing through a [`SwapRouter`] deployed
/// on the test ledger, the way an aggregator API would.
#[derive(Clone, Debug)]
pub struct LocalProvider {
    pub address: Address,
    pub swapper: SwapRouter,
}

impl LocalProvider {
    fn amount_out(&self, query: &QuoteQuery) -> Result<U256> {
        self.swapper
            .quote(query.token_in, query.token_out, query.amount)
            .with_context(|| {
                format!(
                    "no route from {} to {}",
                    query.token_in, query.token_out
                )
            })
    }
}

#[async_trait::async_trait]
impl ConversionProvider for LocalProvider {
    async fn quote(&self, query: QuoteQuery) -> Result<U256> {
        self.amount_out(&query)
    }

    async fn swap(&self, query: SwapQuery) -> Result<Swap> {
        let expected_out = self.amount_out(&query.quote)?;
        let QuoteQuery {
            token_in,
            token_out,
            amount,
        } = query.quote;

        let mut instruction = ConversionInstruction::default();
        if token_in != NATIVE_TOKEN {
            instruction.push(
                token_in,
                IERC20::approveCall {
                    spender: self.address,
                    amount,
                }
                .abi_encode(),
            );
        }
        instruction.push(
            self.address,
            ISwapRouter::swapCall {
                tokenIn: token_in,
                tokenOut: token_out,
                amountIn: amount,
                minAmountOut: query.slippage.discount(expected_out),
            }
            .abi_encode(),
        );
        Ok(Swap {
            instruction,
            expected_out,
        })
    }
}
