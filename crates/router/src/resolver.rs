//! Stateless calculations over a position: proportional balances, mint
//! previews and the conversion that brings a deposit to the position's
//! ratio.

use {
    crate::{Error, pool::Pool},
    alloy::primitives::{Address, U256},
    contracts::{IERC20, IVaultPool},
    ledger::Ledger,
    number::{Bps, WAD, mul_div, narrow, widen},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RebalanceRequest {
    pub amount0_desired: U256,
    pub amount1_desired: U256,
    /// Units of asset1 per unit of asset0, 18 decimal fixed point, in base
    /// units of both assets.
    pub price: U256,
    pub max_slippage_bps: u16,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RebalanceResult {
    /// Asset0 is in excess and gets converted into asset1.
    pub zero_for_one: bool,
    pub swap_amount: U256,
    /// Minimum acceptable output of the conversion.
    pub swap_threshold: U256,
}

/// Preview of a mint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintAmounts {
    pub amount0: U256,
    pub amount1: U256,
    pub mint_amount: U256,
}

pub fn pool_underlying_balances(ledger: &mut Ledger, pool: Address) -> Result<(U256, U256), Error> {
    Pool::read(ledger, pool)?.reserves(ledger)
}

/// The assets `shares` claim tokens are worth, rounded down.
pub fn underlying_balances(
    ledger: &mut Ledger,
    pool: Address,
    shares: U256,
) -> Result<(U256, U256), Error> {
    let (reserve0, reserve1) = pool_underlying_balances(ledger, pool)?;
    let supply = ledger
        .view(pool, &IERC20::totalSupplyCall {})
        .map_err(Error::Pool)?;
    if supply.is_zero() {
        return Err(Error::DivideByZero);
    }
    Ok((
        mul_div(reserve0, shares, supply).ok_or(Error::Overflow)?,
        mul_div(reserve1, shares, supply).ok_or(Error::Overflow)?,
    ))
}

pub fn rebalance_params(
    ledger: &mut Ledger,
    pool: Address,
    request: &RebalanceRequest,
) -> Result<RebalanceResult, Error> {
    let reserves = pool_underlying_balances(ledger, pool)?;
    let result = compute(reserves, request)?;
    tracing::debug!(?pool, ?reserves, ?request, ?result, "rebalance params");
    Ok(result)
}

pub fn mint_amounts(
    ledger: &mut Ledger,
    pool: Address,
    amount0_max: U256,
    amount1_max: U256,
) -> Result<MintAmounts, Error> {
    let preview = ledger
        .view(
            pool,
            &IVaultPool::getMintAmountsCall {
                amount0Max: amount0_max,
                amount1Max: amount1_max,
            },
        )
        .map_err(Error::Pool)?;
    Ok(MintAmounts {
        amount0: preview.amount0,
        amount1: preview.amount1,
        mint_amount: preview.mintAmount,
    })
}

/// Computes the conversion that leaves the desired amounts in the same ratio
/// as `reserves` when converting at the requested price.
///
/// Asset0 is in excess iff `a0 * r1 > a1 * r0`. Converting `x` of the excess
/// asset solves `(a0 - x) / (a1 + x * p) = r0 / r1` (or the mirrored
/// equation), which gives
///
/// ```text
/// x = (a0 * r1 - a1 * r0) * 1e18 / (r1 * 1e18 + r0 * price)
/// y = (a1 * r0 - a0 * r1) * price / (r0 * price + r1 * 1e18)
/// ```
pub fn compute(
    reserves: (U256, U256),
    request: &RebalanceRequest,
) -> Result<RebalanceResult, Error> {
    if request.price.is_zero() {
        return Err(Error::InvalidPrice);
    }
    let slippage = Bps::try_from(request.max_slippage_bps)
        .map_err(|_| Error::InvalidSlippage(request.max_slippage_bps))?;

    let (reserve0, reserve1) = reserves;
    let (amount0, amount1) = (request.amount0_desired, request.amount1_desired);

    let (zero_for_one, swap_amount) = match (reserve0.is_zero(), reserve1.is_zero()) {
        (true, true) if amount0.is_zero() && amount1.is_zero() => (false, U256::ZERO),
        (true, true) => return Err(Error::InvalidPosition),
        // the position only takes asset0
        (false, true) => (false, amount1),
        // the position only takes asset1
        (true, false) => (true, amount0),
        (false, false) => {
            let excess0 = widen(amount0) * widen(reserve1);
            let excess1 = widen(amount1) * widen(reserve0);
            let (wad, price) = (widen(WAD), widen(request.price));
            let denominator = widen(reserve1) * wad + widen(reserve0) * price;
            if excess0 > excess1 {
                let x = (excess0 - excess1) * wad / denominator;
                (true, narrow(x).ok_or(Error::Overflow)?)
            } else {
                let y = (excess1 - excess0) * price / denominator;
                (false, narrow(y).ok_or(Error::Overflow)?)
            }
        }
    };

    let expected_out = expected_output(zero_for_one, swap_amount, request.price)?;
    Ok(RebalanceResult {
        zero_for_one,
        swap_amount,
        swap_threshold: slippage.discount(expected_out),
    })
}

/// Output of converting `amount` at `price`, rounded down.
pub fn expected_output(zero_for_one: bool, amount: U256, price: U256) -> Result<U256, Error> {
    if price.is_zero() {
        return Err(Error::InvalidPrice);
    }
    let out = if zero_for_one {
        mul_div(amount, price, WAD)
    } else {
        mul_div(amount, WAD, price)
    };
    out.ok_or(Error::Overflow)
}

/// The asset1 per asset0 price a quote realizes, 18 decimal fixed point.
///
/// Returns `None` if either side of the quote is zero.
pub fn price_from_quote(zero_for_one: bool, amount_in: U256, amount_out: U256) -> Option<U256> {
    if amount_in.is_zero() || amount_out.is_zero() {
        return None;
    }
    if zero_for_one {
        mul_div(amount_out, WAD, amount_in)
    } else {
        mul_div(amount_in, WAD, amount_out)
    }
}
