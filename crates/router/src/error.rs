use {
    crate::pool::Asset,
    alloy::primitives::{Address, U256},
    ledger::Revert,
};

/// Reasons a router operation aborts. Every error leaves the ledger exactly
/// as it was before the operation started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("failed to move {asset}: {reason}")]
    TransferFailed { asset: Asset, reason: Revert },
    #[error("pool used {used} of {token}, expected at least {minimum}")]
    SlippageExceeded {
        token: Address,
        used: U256,
        minimum: U256,
    },
    #[error("conversion spent {spent} of at most {swap_amount} and returned {received}")]
    SwapAmountMismatch {
        spent: U256,
        swap_amount: U256,
        received: U256,
    },
    #[error("{targets} call targets but {payloads} payloads")]
    ArrayLengthMismatch { targets: usize, payloads: usize },
    #[error("call {index} to {target} reverted: {reason}")]
    CallReverted {
        index: usize,
        target: Address,
        reason: Revert,
    },
    #[error("attached {actual} native currency, expected {expected}")]
    WrongValueSent { expected: U256, actual: U256 },
    #[error("native transfer to {recipient} failed: {reason}")]
    NativeTransferFailed { recipient: Address, reason: Revert },
    #[error("router holds {amount} of {asset}")]
    ResidualBalance { asset: Asset, amount: U256 },
    #[error("position has no outstanding claims")]
    DivideByZero,
    #[error("position holds no reserves")]
    InvalidPosition,
    #[error("price must not be zero")]
    InvalidPrice,
    #[error("slippage of {0} basis points exceeds 10000")]
    InvalidSlippage(u16),
    #[error("neither asset of {pool} is the wrapped native currency")]
    NativeNotSupported { pool: Address },
    #[error("call target {0} is not allowed")]
    TargetNotAllowed(Address),
    #[error("arithmetic overflow")]
    Overflow,
    #[error("pool call failed: {0}")]
    Pool(Revert),
}

impl Error {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TransferFailed { .. } => "transfer_failed",
            Self::SlippageExceeded { .. } => "slippage_exceeded",
            Self::SwapAmountMismatch { .. } => "swap_amount_mismatch",
            Self::ArrayLengthMismatch { .. } => "array_length_mismatch",
            Self::CallReverted { .. } => "call_reverted",
            Self::WrongValueSent { .. } => "wrong_value_sent",
            Self::NativeTransferFailed { .. } => "native_transfer_failed",
            Self::ResidualBalance { .. } => "residual_balance",
            Self::DivideByZero => "divide_by_zero",
            Self::InvalidPosition => "invalid_position",
            Self::InvalidPrice => "invalid_price",
            Self::InvalidSlippage(_) => "invalid_slippage",
            Self::NativeNotSupported { .. } => "native_not_supported",
            Self::TargetNotAllowed(_) => "target_not_allowed",
            Self::Overflow => "overflow",
            Self::Pool(_) => "pool",
        }
    }
}
