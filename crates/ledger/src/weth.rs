use {
    crate::{Context, Contract, Ledger, Revert, decode, erc20, selects},
    alloy::primitives::Bytes,
    contracts::IWETH9::{self, IWETH9Calls},
};

/// Wrapped native currency (WETH9). Plain native transfers are deposits.
#[derive(Debug, Default)]
pub struct WrappedNative;

impl Contract for WrappedNative {
    fn call(&self, ledger: &mut Ledger, ctx: Context, input: &[u8]) -> Result<Bytes, Revert> {
        if input.is_empty() {
            return deposit(ledger, &ctx);
        }
        if !selects::<IWETH9Calls>(input) {
            return erc20::dispatch(ledger, &ctx, decode(input)?);
        }
        match decode::<IWETH9Calls>(input)? {
            IWETH9Calls::deposit(_) => deposit(ledger, &ctx),
            IWETH9Calls::withdraw(IWETH9::withdrawCall { amount }) => {
                ctx.ensure_not_payable()?;
                erc20::burn(ledger, ctx.this, ctx.sender, amount)?;
                ledger.send_native(ctx.this, ctx.sender, amount)?;
                tracing::trace!(account = ?ctx.sender, %amount, "unwrapped");
                Ok(Bytes::new())
            }
        }
    }
}

fn deposit(ledger: &mut Ledger, ctx: &Context) -> Result<Bytes, Revert> {
    erc20::mint(ledger, ctx.this, ctx.sender, ctx.value)?;
    tracing::trace!(account = ?ctx.sender, amount = %ctx.value, "wrapped");
    Ok(Bytes::new())
}
