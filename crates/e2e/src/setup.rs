use {
    crate::LocalProvider,
    alloy::primitives::{Address, U256},
    contracts::NATIVE_TOKEN,
    ledger::erc20,
    router::Router,
    testlib::{Onchain, SwapRouter},
};

pub fn to_wei(base: u64) -> U256 {
    U256::from(base) * U256::from(10).pow(U256::from(18))
}

/// A DAI/WETH position, a router allowed to call a single swapper and a
/// trader that approved the router for everything.
pub struct Fixture {
    pub onchain: Onchain,
    pub router: Router,
    pub provider: LocalProvider,
    pub dai: Address,
    pub weth: Address,
    pub pool: Address,
    pub trader: Address,
}

impl Fixture {
    /// The position holds `reserves` with `supply` claims outstanding. The
    /// swapper trades at `price` WETH (or native currency) per DAI.
    pub fn new(reserves: (U256, U256), supply: U256, price: U256) -> Self {
        let mut onchain = Onchain::new();
        let dai = onchain.deploy_token("DAI");
        let weth = onchain.deploy_weth();
        let pool = onchain.deploy_pool(dai, weth, reserves, supply);

        let swapper = SwapRouter::default()
            .with_pair(dai, weth, price)
            .with_pair(dai, NATIVE_TOKEN, price);
        let address = onchain.deploy_swapper(swapper.clone());
        onchain.mint(dai, address, to_wei(1_000_000));
        onchain.mint(weth, address, to_wei(1_000_000));
        onchain.ledger.fund_native(address, to_wei(1_000_000));

        let router = Router::new(onchain.make_account(), weth).with_allowed_targets([address]);
        let trader = onchain.make_account();
        for token in [dai, weth, pool] {
            onchain.approve(token, trader, router.address(), U256::MAX);
        }

        Self {
            onchain,
            router,
            provider: LocalProvider {
                address,
                swapper,
            },
            dai,
            weth,
            pool,
            trader,
        }
    }

    /// Mints (DAI, WETH) to the trader.
    pub fn fund(&mut self, amounts: (U256, U256)) {
        self.onchain.mint(self.dai, self.trader, amounts.0);
        self.onchain.mint(self.weth, self.trader, amounts.1);
    }

    /// The position's assets as the provider addresses them.
    pub fn provider_tokens(&self, native: bool) -> (Address, Address) {
        (self.dai, if native { NATIVE_TOKEN } else { self.weth })
    }

    pub fn reserves(&mut self) -> (U256, U256) {
        self.router
            .pool_underlying_balances(&mut self.onchain.ledger, self.pool)
            .unwrap()
    }

    pub fn balances(&self, account: Address) -> (U256, U256) {
        (
            self.onchain.balance(self.dai, account),
            self.onchain.balance(self.weth, account),
        )
    }

    pub fn claims(&self, account: Address) -> U256 {
        self.onchain.balance(self.pool, account)
    }

    pub fn total_claims(&self) -> U256 {
        erc20::total_supply(&self.onchain.ledger, self.pool)
    }

    pub fn assert_router_clean(&self) {
        let router = self.router.address();
        assert_eq!(self.balances(router), (U256::ZERO, U256::ZERO));
        assert_eq!(self.claims(router), U256::ZERO);
        assert_eq!(self.onchain.native_balance(router), U256::ZERO);
        for token in [self.dai, self.weth] {
            let allowance = self
                .onchain
                .ledger
                .state()
                .allowance(token, router, self.pool);
            assert_eq!(allowance, U256::ZERO);
        }
    }
}
