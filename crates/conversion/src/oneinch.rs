//! 1inch aggregation API v3 client.
//!
//! Only the endpoints needed to build conversion instructions are covered:
//! `quote`, `approve/spender`, `approve/calldata` and `swap`.

use {
    crate::provider::{ConversionProvider, QuoteQuery, Swap, SwapQuery},
    alloy::primitives::{Address, Bytes, U256},
    anyhow::{Context, Result, anyhow, ensure},
    contracts::NATIVE_TOKEN,
    number::serialization::HexOrDecimalU256,
    reqwest::Client,
    router::ConversionInstruction,
    serde::Deserialize,
    serde_with::serde_as,
    url::Url,
};

impl QuoteQuery {
    fn into_url(self, base_url: &Url, chain_id: u64) -> Url {
        let mut url = endpoint(base_url, chain_id, "quote");
        url.query_pairs_mut()
            .append_pair("fromTokenAddress", &self.token_in.to_string())
            .append_pair("toTokenAddress", &self.token_out.to_string())
            .append_pair("amount", &self.amount.to_string());
        url
    }
}

impl SwapQuery {
    fn into_url(self, base_url: &Url, chain_id: u64) -> Url {
        let mut url = endpoint(base_url, chain_id, "swap");
        url.query_pairs_mut()
            .append_pair("fromTokenAddress", &self.quote.token_in.to_string())
            .append_pair("toTokenAddress", &self.quote.token_out.to_string())
            .append_pair("amount", &self.quote.amount.to_string())
            .append_pair("fromAddress", &self.from.to_string())
            .append_pair("slippage", &self.slippage.as_percent().to_string())
            // The router only holds the funds while the instruction runs.
            .append_pair("disableEstimate", "true");
        url
    }
}

fn approve_calldata_url(base_url: &Url, chain_id: u64, token: Address, amount: U256) -> Url {
    let mut url = endpoint(base_url, chain_id, "approve/calldata");
    url.query_pairs_mut()
        .append_pair("amount", &amount.to_string())
        .append_pair("tokenAddress", &token.to_string());
    url
}

fn endpoint(base_url: &Url, chain_id: u64, path: &str) -> Url {
    base_url
        .join(&format!("v3.0/{chain_id}/{path}"))
        .expect("unexpectedly invalid URL segment")
}

/// A 1inch API response.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RestResponse<T> {
    Ok(T),
    Err(RestError),
}

impl<T> RestResponse<T> {
    fn into_result(self) -> Result<T> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err(err) => Err(anyhow!(
                "1inch error {}: {}",
                err.status_code,
                err.description
            )),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RestError {
    pub status_code: u32,
    pub description: String,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde_as(as = "HexOrDecimalU256")]
    pub from_token_amount: U256,
    #[serde_as(as = "HexOrDecimalU256")]
    pub to_token_amount: U256,
}

/// Approve spender response.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Spender {
    pub address: Address,
}

/// A call to make, as returned by `approve/calldata` and inside `swap`.
#[serde_as]
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub to: Address,
    pub data: Bytes,
    #[serde_as(as = "HexOrDecimalU256")]
    pub value: U256,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    #[serde_as(as = "HexOrDecimalU256")]
    pub to_token_amount: U256,
    pub tx: Transaction,
}

/// 1inch API client.
#[derive(Debug, Clone)]
pub struct OneInch {
    client: Client,
    base_url: Url,
    chain_id: u64,
}

impl OneInch {
    pub const DEFAULT_URL: &'static str = "https://api.1inch.exchange/";

    // 1: mainnet, 137: polygon
    pub const SUPPORTED_CHAINS: &'static [u64] = &[1, 137];

    pub fn new(base_url: Url, client: Client, chain_id: u64) -> Result<Self> {
        ensure!(
            Self::SUPPORTED_CHAINS.contains(&chain_id),
            "1inch is not supported on chain {chain_id}"
        );
        Ok(Self {
            client,
            base_url,
            chain_id,
        })
    }

    pub async fn get_quote(&self, query: QuoteQuery) -> Result<Quote> {
        logged_query::<RestResponse<_>>(&self.client, query.into_url(&self.base_url, self.chain_id))
            .await?
            .into_result()
    }

    /// Address that has to be approved to spend sold tokens.
    pub async fn get_spender(&self) -> Result<Spender> {
        logged_query(
            &self.client,
            endpoint(&self.base_url, self.chain_id, "approve/spender"),
        )
        .await
    }

    /// The approval of `amount` of `token` to the spender.
    pub async fn get_approve_calldata(&self, token: Address, amount: U256) -> Result<Transaction> {
        let url = approve_calldata_url(&self.base_url, self.chain_id, token, amount);
        logged_query::<RestResponse<_>>(&self.client, url)
            .await?
            .into_result()
    }

    pub async fn get_swap(&self, query: SwapQuery) -> Result<SwapResponse> {
        logged_query::<RestResponse<_>>(&self.client, query.into_url(&self.base_url, self.chain_id))
            .await?
            .into_result()
    }
}

#[async_trait::async_trait]
impl ConversionProvider for OneInch {
    async fn quote(&self, query: QuoteQuery) -> Result<U256> {
        Ok(self.get_quote(query).await?.to_token_amount)
    }

    async fn swap(&self, query: SwapQuery) -> Result<Swap> {
        let mut instruction = ConversionInstruction::default();
        if query.quote.token_in != NATIVE_TOKEN {
            let approval = self
                .get_approve_calldata(query.quote.token_in, query.quote.amount)
                .await?;
            instruction.push(approval.to, approval.data);
        }
        let swap = self.get_swap(query).await?;
        instruction.push(swap.tx.to, swap.tx.data);
        Ok(Swap {
            instruction,
            expected_out: swap.to_token_amount,
        })
    }
}

async fn logged_query<D>(client: &Client, url: Url) -> Result<D>
where
    D: for<'de> Deserialize<'de>,
{
    tracing::debug!(%url, "query 1inch API");
    let response = client.get(url).send().await?.text().await;
    tracing::debug!(?response, "response from 1inch API");
    serde_json::from_str(&response?).context("1inch result parsing failed")
}
