use {
    crate::math::mul_div,
    alloy::primitives::U256,
    serde::{Deserialize, Serialize},
    thiserror::Error,
};

/// Basis points in a whole.
pub const MAX_BPS: u16 = 10_000;

/// A tolerance expressed in basis points. The value is guaranteed to be in
/// the range [0, 10000].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Bps(u16);

impl Bps {
    pub const ZERO: Self = Self(0);

    pub fn get(&self) -> u16 {
        self.0
    }

    /// Reduces `amount` by this tolerance, rounding down.
    pub fn discount(&self, amount: U256) -> U256 {
        // `MAX_BPS - self.0` never exceeds `MAX_BPS`, so this cannot overflow
        mul_div(
            amount,
            U256::from(MAX_BPS - self.0),
            U256::from(MAX_BPS),
        )
        .unwrap_or_default()
    }

    /// Fraction used by the 1inch API: `1` is 1%.
    pub fn as_percent(&self) -> f64 {
        f64::from(self.0) / 100.
    }
}

impl TryFrom<u16> for Bps {
    type Error = OutOfRangeError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value > MAX_BPS {
            return Err(OutOfRangeError(value));
        }
        Ok(Self(value))
    }
}

impl From<Bps> for u16 {
    fn from(value: Bps) -> Self {
        value.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0} basis points is out of the expected range [0, 10000]")]
pub struct OutOfRangeError(pub u16);
