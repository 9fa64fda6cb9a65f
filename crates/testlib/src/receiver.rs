use {
    alloy::primitives::Bytes,
    ledger::{Context, Contract, Ledger, Revert},
};

/// An account whose code rejects every incoming native transfer.
#[derive(Debug, Default)]
pub struct RejectingReceiver;

impl Contract for RejectingReceiver {
    fn call(&self, _: &mut Ledger, ctx: Context, _: &[u8]) -> Result<Bytes, Revert> {
        if !ctx.value.is_zero() {
            return Err(Revert::new("receiver does not accept native currency"));
        }
        Ok(Bytes::new())
    }
}
