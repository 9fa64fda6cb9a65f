use {
    crate::Error,
    alloy::primitives::{Address, U256},
    contracts::IVaultPool,
    ledger::Ledger,
    std::fmt,
};

/// Something an account can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Asset {
    Native,
    Token(Address),
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native currency"),
            Self::Token(token) => write!(f, "token {token}"),
        }
    }
}

/// One of the two assets of a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Zero,
    One,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::Zero => Self::One,
            Self::One => Self::Zero,
        }
    }

    /// Selects the value belonging to this side of a pair.
    pub fn pick<T>(self, pair: (T, T)) -> T {
        match self {
            Self::Zero => pair.0,
            Self::One => pair.1,
        }
    }
}

/// A position and its two underlying tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pool {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
}

impl Pool {
    pub fn read(ledger: &mut Ledger, address: Address) -> Result<Self, Error> {
        Ok(Self {
            address,
            token0: ledger
                .view(address, &IVaultPool::token0Call {})
                .map_err(Error::Pool)?,
            token1: ledger
                .view(address, &IVaultPool::token1Call {})
                .map_err(Error::Pool)?,
        })
    }

    pub fn token(&self, side: Side) -> Address {
        side.pick((self.token0, self.token1))
    }

    /// The side holding the wrapped native currency.
    pub fn native_side(&self, weth: Address) -> Result<Side, Error> {
        if self.token0 == weth {
            Ok(Side::Zero)
        } else if self.token1 == weth {
            Ok(Side::One)
        } else {
            Err(Error::NativeNotSupported { pool: self.address })
        }
    }

    pub fn reserves(&self, ledger: &mut Ledger) -> Result<(U256, U256), Error> {
        let balances = ledger
            .view(self.address, &IVaultPool::getUnderlyingBalancesCall {})
            .map_err(Error::Pool)?;
        Ok((balances.amount0Current, balances.amount1Current))
    }
}
