use {
    crate::{RejectingReceiver, SwapRouter, VaultPool},
    alloy::primitives::{Address, U256},
    contracts::IERC20,
    ledger::{Ledger, erc20, erc20::Erc20, weth::WrappedNative},
};

/// Wrapper over a [`Ledger`] with deployed test contracts.
/// Exposes various utility methods for tests.
/// Deterministically generates unique addresses.
#[derive(Debug, Default)]
pub struct Onchain {
    pub ledger: Ledger,
    addresses: AddressGenerator,
    weth: Option<Address>,
}

impl Onchain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a fresh account without code.
    pub fn make_account(&mut self) -> Address {
        self.addresses.next_address()
    }

    /// Generates `N` fresh accounts holding `with_native` native currency each.
    pub fn make_accounts<const N: usize>(&mut self, with_native: U256) -> [Address; N] {
        std::array::from_fn(|_| {
            let account = self.make_account();
            self.ledger.fund_native(account, with_native);
            account
        })
    }

    pub fn deploy_token(&mut self, symbol: &str) -> Address {
        let address = self.addresses.next_address();
        self.ledger.deploy(address, Erc20::new(symbol));
        address
    }

    /// Deploys the wrapped native currency. Later calls return the same
    /// contract.
    pub fn deploy_weth(&mut self) -> Address {
        if let Some(weth) = self.weth {
            return weth;
        }
        let address = self.addresses.next_address();
        self.ledger.deploy(address, WrappedNative);
        self.weth = Some(address);
        address
    }

    /// Deploys a vault pool holding `reserves` with `supply` claim tokens
    /// outstanding. The claim tokens belong to a fresh founder account.
    pub fn deploy_pool(
        &mut self,
        token0: Address,
        token1: Address,
        reserves: (U256, U256),
        supply: U256,
    ) -> Address {
        let address = self.addresses.next_address();
        self.ledger.deploy(address, VaultPool::new(token0, token1));
        self.mint(token0, address, reserves.0);
        self.mint(token1, address, reserves.1);
        let founder = self.make_account();
        self.mint(address, founder, supply);
        address
    }

    pub fn deploy_swapper(&mut self, swapper: SwapRouter) -> Address {
        let address = self.addresses.next_address();
        self.ledger.deploy(address, swapper);
        address
    }

    /// An account that rejects native transfers.
    pub fn deploy_rejecting_receiver(&mut self) -> Address {
        let address = self.addresses.next_address();
        self.ledger.deploy(address, RejectingReceiver);
        address
    }

    /// Credits `amount` of `token` to `to`. Wrapped native currency stays
    /// fully backed.
    pub fn mint(&mut self, token: Address, to: Address, amount: U256) {
        if self.weth == Some(token) {
            self.ledger.fund_native(token, amount);
        }
        erc20::mint(&mut self.ledger, token, to, amount).unwrap();
    }

    pub fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: U256) {
        self.ledger
            .call_sol(
                owner,
                token,
                U256::ZERO,
                &IERC20::approveCall { spender, amount },
            )
            .unwrap();
    }

    pub fn balance(&self, token: Address, owner: Address) -> U256 {
        erc20::balance_of(&self.ledger, token, owner)
    }

    pub fn native_balance(&self, account: Address) -> U256 {
        self.ledger.native_balance(account)
    }
}

#[derive(Debug)]
struct AddressGenerator {
    id: u64,
}

impl Default for AddressGenerator {
    fn default() -> Self {
        // Start from a high number so generated addresses never collide with
        // the precompile range.
        Self { id: 100500 }
    }
}

impl AddressGenerator {
    fn next_address(&mut self) -> Address {
        self.id += 1;
        let mut buffer = [0_u8; 20];
        buffer[12..].copy_from_slice(&self.id.to_be_bytes());
        Address::from(buffer)
    }
}
