//! Shared fixture of the router unit tests.

use {
    crate::{
        ConversionInstruction,
        Router,
        resolver::{self, RebalanceRequest, RebalanceResult},
    },
    alloy::{
        primitives::{Address, U256},
        sol_types::SolCall,
    },
    contracts::{IERC20, ISwapRouter, NATIVE_TOKEN},
    number::WAD,
    testlib::{Onchain, SwapRouter},
};

pub struct Setup {
    pub onchain: Onchain,
    pub router: Router,
    /// Plain ERC20 side of the pool (token0).
    pub dai: Address,
    /// Wrapped native side of the pool (token1).
    pub weth: Address,
    pub pool: Address,
    pub swapper: Address,
    pub alice: Address,
}

/// A DAI/WETH pool holding `reserves` with `supply` claims outstanding and a
/// swapper trading at `price` WETH per DAI.
pub fn setup(reserves: (u64, u64), supply: u64, price: U256) -> Setup {
    let mut onchain = Onchain::new();
    let dai = onchain.deploy_token("DAI");
    let weth = onchain.deploy_weth();
    let pool = onchain.deploy_pool(
        dai,
        weth,
        (U256::from(reserves.0), U256::from(reserves.1)),
        U256::from(supply),
    );
    let to_dai = number::mul_div(WAD, WAD, price).unwrap();
    let swapper = onchain.deploy_swapper(
        SwapRouter::default()
            .with_pair(dai, weth, price)
            .with_rate(NATIVE_TOKEN, dai, to_dai)
            .with_rate(dai, NATIVE_TOKEN, price),
    );
    onchain.mint(dai, swapper, U256::from(1_000_000));
    onchain.mint(weth, swapper, U256::from(1_000_000));
    onchain.ledger.fund_native(swapper, U256::from(1_000_000));

    let router = Router::new(onchain.make_account(), weth).with_allowed_targets([swapper]);
    let alice = onchain.make_account();
    for token in [dai, weth, pool] {
        onchain.approve(token, alice, router.address(), U256::MAX);
    }

    Setup {
        onchain,
        router,
        dai,
        weth,
        pool,
        swapper,
        alice,
    }
}

impl Setup {
    /// Gives `account` `amounts` of (DAI, WETH).
    pub fn fund(&mut self, account: Address, amounts: (u64, u64)) {
        self.onchain.mint(self.dai, account, U256::from(amounts.0));
        self.onchain.mint(self.weth, account, U256::from(amounts.1));
    }

    pub fn resolve(&mut self, amounts: (u64, u64), price: U256) -> RebalanceResult {
        resolver::rebalance_params(
            &mut self.onchain.ledger,
            self.pool,
            &RebalanceRequest {
                amount0_desired: U256::from(amounts.0),
                amount1_desired: U256::from(amounts.1),
                price,
                max_slippage_bps: 100,
            },
        )
        .unwrap()
    }

    /// Approve + swap through the swapper, the way a conversion provider
    /// builds instructions. `native` swaps from the native currency instead
    /// of the source token.
    pub fn swap_instruction(
        &self,
        params: &RebalanceResult,
        amount_in: U256,
        native: bool,
    ) -> ConversionInstruction {
        let (token_in, token_out) = if params.zero_for_one {
            (self.dai, self.weth)
        } else {
            (self.weth, self.dai)
        };
        let token_in = if native { NATIVE_TOKEN } else { token_in };

        let mut instruction = ConversionInstruction::default();
        if !native {
            instruction.push(
                token_in,
                IERC20::approveCall {
                    spender: self.swapper,
                    amount: amount_in,
                }
                .abi_encode(),
            );
        }
        instruction.push(
            self.swapper,
            ISwapRouter::swapCall {
                tokenIn: token_in,
                tokenOut: token_out,
                amountIn: amount_in,
                minAmountOut: params.swap_threshold,
            }
            .abi_encode(),
        );
        instruction
    }

    pub fn balances(&self, account: Address) -> (U256, U256) {
        (
            self.onchain.balance(self.dai, account),
            self.onchain.balance(self.weth, account),
        )
    }

    pub fn assert_router_clean(&self) {
        let router = self.router.address();
        assert_eq!(self.balances(router), (U256::ZERO, U256::ZERO));
        assert_eq!(self.onchain.balance(self.pool, router), U256::ZERO);
        assert_eq!(self.onchain.native_balance(router), U256::ZERO);
    }
}
