use {
    alloy::primitives::{Address, U256},
    std::collections::HashMap,
};

/// Every balance, allowance and supply tracked by the ledger.
///
/// Zero entries are never stored so two states holding the same amounts
/// compare equal regardless of their history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
    native: HashMap<Address, U256>,
    balances: HashMap<(Address, Address), U256>,
    allowances: HashMap<(Address, Address, Address), U256>,
    supplies: HashMap<Address, U256>,
}

impl State {
    pub fn native_balance(&self, account: Address) -> U256 {
        self.native.get(&account).copied().unwrap_or_default()
    }

    pub fn set_native_balance(&mut self, account: Address, amount: U256) {
        store(&mut self.native, account, amount);
    }

    pub fn balance(&self, token: Address, owner: Address) -> U256 {
        self.balances
            .get(&(token, owner))
            .copied()
            .unwrap_or_default()
    }

    pub fn set_balance(&mut self, token: Address, owner: Address, amount: U256) {
        store(&mut self.balances, (token, owner), amount);
    }

    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    pub fn set_allowance(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: U256,
    ) {
        store(&mut self.allowances, (token, owner, spender), amount);
    }

    pub fn total_supply(&self, token: Address) -> U256 {
        self.supplies.get(&token).copied().unwrap_or_default()
    }

    pub fn set_total_supply(&mut self, token: Address, amount: U256) {
        store(&mut self.supplies, token, amount);
    }
}

fn store<K: std::hash::Hash + Eq>(map: &mut HashMap<K, U256>, key: K, amount: U256) {
    if amount.is_zero() {
        map.remove(&key);
    } else {
        map.insert(key, amount);
    }
}
