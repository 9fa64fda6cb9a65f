use {
    alloy::primitives::{Address, U256},
    anyhow::Result,
    number::Bps,
    router::ConversionInstruction,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteQuery {
    /// Asset to sell, [`contracts::NATIVE_TOKEN`] for the native currency.
    pub token_in: Address,
    pub token_out: Address,
    /// Amount to sell in base units.
    pub amount: U256,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapQuery {
    pub quote: QuoteQuery,
    /// Account executing the instruction, i.e. the router.
    pub from: Address,
    pub slippage: Bps,
}

/// Calls converting an amount of one asset into another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Swap {
    pub instruction: ConversionInstruction,
    /// What the provider expects the instruction to return.
    pub expected_out: U256,
}

// Mockable version of the provider
#[mockall::automock]
#[async_trait::async_trait]
pub trait ConversionProvider: Send + Sync {
    /// The amount of `token_out` selling `amount` of `token_in` would buy.
    async fn quote(&self, query: QuoteQuery) -> Result<U256>;

    /// Builds the calls performing the conversion. Selling an ERC20 token
    /// starts with an approval of the provider's spender.
    async fn swap(&self, query: SwapQuery) -> Result<Swap>;
}
