//! Reference contracts and fixtures for exercising the router against the
//! in-memory ledger.

pub mod onchain;
pub mod pool;
pub mod receiver;
pub mod swapper;
pub mod tokens;

pub use {
    onchain::Onchain,
    pool::VaultPool,
    receiver::RejectingReceiver,
    swapper::SwapRouter,
};
