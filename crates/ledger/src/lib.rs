//! An in-memory ledger with just enough EVM semantics to run the router
//! against real contract interfaces: native balances, ERC20 state, contracts
//! addressed by ABI calldata, and calls that revert atomically.
//!
//! Every [`Ledger::call`] takes a snapshot of the [`State`] before executing
//! and restores it if the callee reverts, so nested calls behave like EVM
//! message calls. [`Ledger::transact`] applies the same rule to a whole unit
//! of work.

pub mod erc20;
pub mod state;
pub mod weth;

pub use state::State;
use {
    alloy::{
        primitives::{Address, Bytes, U256},
        sol_types::{SolCall, SolInterface},
    },
    std::{collections::HashMap, fmt, sync::Arc},
};

/// Code deployed at an address of the ledger.
pub trait Contract: Send + Sync + fmt::Debug {
    /// Handles a message call. `input` is empty for plain native transfers.
    fn call(&self, ledger: &mut Ledger, ctx: Context, input: &[u8]) -> Result<Bytes, Revert>;
}

/// Execution context of a message call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Context {
    /// Address of the contract being executed.
    pub this: Address,
    /// Immediate caller.
    pub sender: Address,
    /// Native value attached to the call. It is already credited to `this`.
    pub value: U256,
}

impl Context {
    pub fn ensure_not_payable(&self) -> Result<(), Revert> {
        if !self.value.is_zero() {
            return Err(Revert::new("non-payable function received value"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("execution reverted: {0}")]
pub struct Revert(pub String);

impl Revert {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Default)]
pub struct Ledger {
    state: State,
    contracts: HashMap<Address, Arc<dyn Contract>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `contract` at `address`. Existing code is replaced.
    pub fn deploy(&mut self, address: Address, contract: impl Contract + 'static) {
        tracing::trace!(?address, ?contract, "deploy");
        self.contracts.insert(address, Arc::new(contract));
    }

    pub fn is_contract(&self, address: Address) -> bool {
        self.contracts.contains_key(&address)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Direct access to the raw state. Contract implementations use this to
    /// update their own storage.
    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    pub fn native_balance(&self, account: Address) -> U256 {
        self.state.native_balance(account)
    }

    /// Credits native currency out of thin air, like a genesis allocation.
    pub fn fund_native(&mut self, account: Address, amount: U256) {
        let balance = self.state.native_balance(account).saturating_add(amount);
        self.state.set_native_balance(account, balance);
    }

    /// Executes a message call from `from` to `to` attaching `value`.
    ///
    /// Calls to addresses without code succeed and return no data. If the
    /// call reverts every state change it made, including the value
    /// transfer, is undone.
    pub fn call(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
        input: &[u8],
    ) -> Result<Bytes, Revert> {
        let snapshot = self.state.clone();
        let result = self.execute(from, to, value, input);
        if let Err(err) = &result {
            tracing::trace!(?from, ?to, %value, %err, "call reverted");
            self.state = snapshot;
        }
        result
    }

    /// Sends native currency. The recipient's code runs with empty input and
    /// may reject the transfer.
    pub fn send_native(&mut self, from: Address, to: Address, amount: U256) -> Result<(), Revert> {
        self.call(from, to, amount, &[]).map(|_| ())
    }

    /// Like [`Ledger::call`] but ABI encodes the call and decodes its return
    /// data.
    pub fn call_sol<C: SolCall>(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
        call: &C,
    ) -> Result<C::Return, Revert> {
        let output = self.call(from, to, value, &call.abi_encode())?;
        C::abi_decode_returns(&output)
            .map_err(|err| Revert::new(format!("malformed return data from {to}: {err}")))
    }

    /// Executes a call and discards all of its state changes.
    pub fn view<C: SolCall>(&mut self, to: Address, call: &C) -> Result<C::Return, Revert> {
        let snapshot = self.state.clone();
        let result = self.call_sol(Address::ZERO, to, U256::ZERO, call);
        self.state = snapshot;
        result
    }

    /// Runs `f` as a single atomic unit of work: if it returns an error the
    /// ledger is restored to the state it had before.
    pub fn transact<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E> {
        let snapshot = self.state.clone();
        let result = f(self);
        if result.is_err() {
            self.state = snapshot;
        }
        result
    }

    fn execute(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
        input: &[u8],
    ) -> Result<Bytes, Revert> {
        self.move_native(from, to, value)?;
        match self.contracts.get(&to).cloned() {
            Some(contract) => contract.call(
                self,
                Context {
                    this: to,
                    sender: from,
                    value,
                },
                input,
            ),
            None => Ok(Bytes::new()),
        }
    }

    fn move_native(&mut self, from: Address, to: Address, amount: U256) -> Result<(), Revert> {
        if amount.is_zero() {
            return Ok(());
        }
        let remaining = self
            .state
            .native_balance(from)
            .checked_sub(amount)
            .ok_or_else(|| Revert::new("insufficient native balance"))?;
        self.state.set_native_balance(from, remaining);
        let credited = self
            .state
            .native_balance(to)
            .checked_add(amount)
            .ok_or_else(|| Revert::new("native balance overflow"))?;
        self.state.set_native_balance(to, credited);
        Ok(())
    }
}

/// Decodes calldata for one of the functions of `I`.
pub fn decode<I: SolInterface>(input: &[u8]) -> Result<I, Revert> {
    I::abi_decode(input).map_err(|err| Revert::new(format!("invalid calldata: {err}")))
}

/// Whether `input` starts with the selector of a function of `I`.
pub fn selects<I: SolInterface>(input: &[u8]) -> bool {
    input
        .get(..4)
        .and_then(|selector| <[u8; 4]>::try_from(selector).ok())
        .is_some_and(I::valid_selector)
}
