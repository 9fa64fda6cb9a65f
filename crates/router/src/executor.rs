//! Executes conversion instructions built by an external provider. The
//! payloads are never interpreted; the router only decides where they may be
//! sent and checks the balances they leave behind.

use {
    crate::{Error, metrics},
    alloy::primitives::{Address, Bytes, U256},
    ledger::Ledger,
    serde::{Deserialize, Serialize},
    std::collections::HashSet,
};

/// Ordered (target, payload) calls, typically an approval followed by the
/// conversion itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionInstruction {
    pub targets: Vec<Address>,
    pub payloads: Vec<Bytes>,
}

impl ConversionInstruction {
    pub fn push(&mut self, target: Address, payload: impl Into<Bytes>) {
        self.targets.push(target);
        self.payloads.push(payload.into());
    }
}

/// Call targets the executor accepts. An empty list accepts every target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowList(HashSet<Address>);

impl AllowList {
    pub fn new(targets: impl IntoIterator<Item = Address>) -> Self {
        Self(targets.into_iter().collect())
    }

    /// Whether `target` may be called. The assets of the current operation
    /// are always callable so that approvals work.
    pub fn permits(&self, target: Address, assets: &[Address]) -> bool {
        self.0.is_empty() || self.0.contains(&target) || assets.contains(&target)
    }
}

/// Executes every call of `instruction` from `sender`. The last call carries
/// `value` as attached native currency.
///
/// Either all calls succeed or none of their effects persist.
pub fn execute(
    ledger: &mut Ledger,
    sender: Address,
    instruction: &ConversionInstruction,
    allowed: &AllowList,
    assets: &[Address],
    value: U256,
) -> Result<(), Error> {
    let ConversionInstruction { targets, payloads } = instruction;
    if targets.len() != payloads.len() {
        return Err(Error::ArrayLengthMismatch {
            targets: targets.len(),
            payloads: payloads.len(),
        });
    }
    if let Some(target) = targets
        .iter()
        .find(|target| !allowed.permits(**target, assets))
    {
        return Err(Error::TargetNotAllowed(*target));
    }

    ledger.transact(|ledger| {
        let last = targets.len().saturating_sub(1);
        for (index, (target, payload)) in targets.iter().zip(payloads).enumerate() {
            let value = if index == last { value } else { U256::ZERO };
            ledger
                .call(sender, *target, value, payload)
                .map_err(|reason| Error::CallReverted {
                    index,
                    target: *target,
                    reason,
                })?;
            tracing::debug!(index, ?target, %value, "executed call");
            metrics::get().executed_calls.inc();
        }
        Ok(())
    })
}
