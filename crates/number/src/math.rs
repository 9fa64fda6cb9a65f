use alloy::primitives::{U256, U512, Uint};

/// Wide enough for the product of three 256-bit values.
pub type U768 = Uint<768, 12>;

/// One unit in 18 decimal fixed point.
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Computes `x * y / d` rounding down.
///
/// Returns `None` if `d` is `0` or if the result overflows a 256-bit integer.
pub fn mul_div(x: U256, y: U256, d: U256) -> Option<U256> {
    if d.is_zero() {
        return None;
    }

    // fast path when math in U256 doesn't overflow
    if let Some(product) = x.checked_mul(y) {
        return Some(product / d);
    }

    narrow(wide_mul(x, y) / U512::from(d))
}

/// Computes `x * y / d` rounding up.
///
/// Returns `None` if `d` is `0` or if the result overflows a 256-bit integer.
pub fn mul_div_ceil(x: U256, y: U256, d: U256) -> Option<U256> {
    if d.is_zero() {
        return None;
    }

    if let Some(product) = x.checked_mul(y) {
        let (quotient, remainder) = (product / d, product % d);
        return quotient.checked_add(U256::from(!remainder.is_zero()));
    }

    let product = wide_mul(x, y);
    let d = U512::from(d);
    let (quotient, remainder) = (product / d, product % d);
    narrow(quotient)?.checked_add(U256::from(!remainder.is_zero()))
}

/// The full product of two 256-bit values.
pub fn wide_mul(x: U256, y: U256) -> U512 {
    U512::from(x) * U512::from(y)
}

/// Widens a value for arithmetic on products of up to three factors.
pub fn widen(value: U256) -> U768 {
    U768::from(value)
}

/// Converts a wide value back to 256 bits if it fits.
pub fn narrow<const BITS: usize, const LIMBS: usize>(value: Uint<BITS, LIMBS>) -> Option<U256> {
    let limbs = value.as_limbs();
    if limbs.iter().skip(4).any(|limb| *limb != 0) {
        return None;
    }
    Some(U256::from_limbs_slice(&limbs[..4]))
}
