//! Refines the price handed to the resolver with real quotes.
//!
//! The first swap amount is computed from the caller's price estimate. Each
//! round quotes that amount, takes the price the quote realizes and asks the
//! resolver again, until two rounds agree within a tolerance.

use {
    crate::provider::{ConversionProvider, QuoteQuery, SwapQuery},
    alloy::primitives::{Address, U256},
    number::Bps,
    router::{
        Conversion,
        RebalanceRequest,
        RebalanceResult,
        config::{Config, Convergence},
        resolver,
    },
    std::time::Duration,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("swap amount did not settle within {0:?}")]
    ConvergenceTimeout(Duration),
    #[error("swap amount did not settle after {iterations} iterations")]
    DidNotConverge { iterations: usize },
    #[error("provider quoted nothing for {0}")]
    EmptyQuote(U256),
    #[error("conversion expected to return {expected_out}, below the threshold {threshold}")]
    BelowThreshold {
        expected_out: U256,
        threshold: U256,
    },
    #[error(transparent)]
    Router(#[from] router::Error),
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Converged {
    pub params: RebalanceResult,
    /// The last price fed to the resolver.
    pub price: U256,
    /// Quotes it took.
    pub iterations: usize,
}

/// Converges the conversion of a deposit of `request`'s desired amounts into
/// a position holding `reserves` of `tokens`.
///
/// `tokens` are the assets as the provider knows them, so the native side
/// may be [`contracts::NATIVE_TOKEN`].
pub async fn converge(
    provider: &dyn ConversionProvider,
    reserves: (U256, U256),
    tokens: (Address, Address),
    request: RebalanceRequest,
    bounds: &Convergence,
) -> Result<Converged, Error> {
    let rounds = refine(provider, reserves, tokens, request, bounds);
    tokio::time::timeout(bounds.timeout, rounds)
        .await
        .map_err(|_| Error::ConvergenceTimeout(bounds.timeout))?
}

async fn refine(
    provider: &dyn ConversionProvider,
    reserves: (U256, U256),
    tokens: (Address, Address),
    mut request: RebalanceRequest,
    bounds: &Convergence,
) -> Result<Converged, Error> {
    let mut params = resolver::compute(reserves, &request)?;
    for iteration in 0..bounds.max_iterations {
        if params.swap_amount.is_zero() {
            return Ok(Converged {
                params,
                price: request.price,
                iterations: iteration,
            });
        }

        let (token_in, token_out) = if params.zero_for_one {
            tokens
        } else {
            (tokens.1, tokens.0)
        };
        let amount_out = provider
            .quote(QuoteQuery {
                token_in,
                token_out,
                amount: params.swap_amount,
            })
            .await?;
        request.price =
            resolver::price_from_quote(params.zero_for_one, params.swap_amount, amount_out)
                .ok_or(Error::EmptyQuote(params.swap_amount))?;

        let next = resolver::compute(reserves, &request)?;
        tracing::debug!(
            iteration,
            price = %request.price,
            swap_amount = %next.swap_amount,
            "refined conversion"
        );
        let settled = next.zero_for_one == params.zero_for_one
            && within(params.swap_amount, next.swap_amount, bounds.tolerance);
        params = next;
        if settled {
            return Ok(Converged {
                params,
                price: request.price,
                iterations: iteration + 1,
            });
        }
    }
    Err(Error::DidNotConverge {
        iterations: bounds.max_iterations,
    })
}

/// Whether `next` differs from `previous` by at most `tolerance` of
/// `previous`.
fn within(previous: U256, next: U256, tolerance: Bps) -> bool {
    let allowed = previous - tolerance.discount(previous);
    previous.abs_diff(next) <= allowed
}

/// Asks the provider for the instruction converting the converged swap
/// amount out of `router`. Fails if the provider expects less than the swap
/// threshold in return.
pub async fn prepare(
    provider: &dyn ConversionProvider,
    router: Address,
    tokens: (Address, Address),
    converged: &Converged,
    slippage: Bps,
) -> Result<Conversion, Error> {
    let params = &converged.params;
    let (token_in, token_out) = if params.zero_for_one {
        tokens
    } else {
        (tokens.1, tokens.0)
    };
    let swap = provider
        .swap(SwapQuery {
            quote: QuoteQuery {
                token_in,
                token_out,
                amount: params.swap_amount,
            },
            from: router,
            slippage,
        })
        .await?;
    if swap.expected_out < params.swap_threshold {
        return Err(Error::BelowThreshold {
            expected_out: swap.expected_out,
            threshold: params.swap_threshold,
        });
    }
    Ok(Conversion {
        zero_for_one: params.zero_for_one,
        swap_amount: params.swap_amount,
        instruction: swap.instruction,
    })
}

/// A converged conversion together with the instruction carrying it out.
#[derive(Clone, Debug)]
pub struct Plan {
    pub converged: Converged,
    pub conversion: Conversion,
}

/// Converges and prepares a conversion for the router of `config` within
/// its convergence bounds. The configured default slippage applies unless
/// `slippage` is given.
pub async fn plan(
    provider: &dyn ConversionProvider,
    config: &Config,
    reserves: (U256, U256),
    tokens: (Address, Address),
    request: RebalanceRequest,
    slippage: Option<Bps>,
) -> Result<Plan, Error> {
    let converged = converge(provider, reserves, tokens, request, &config.convergence).await?;
    let slippage = slippage.unwrap_or(config.default_slippage);
    let conversion = prepare(provider, config.router, tokens, &converged, slippage).await?;
    Ok(Plan {
        converged,
        conversion,
    })
}
