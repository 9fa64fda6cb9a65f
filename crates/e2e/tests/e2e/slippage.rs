use {
    alloy::primitives::U256,
    e2e::{Fixture, to_wei},
    number::WAD,
    router::{DepositInstruction, Error, WithdrawalInstruction},
};

#[test]
fn deposit_using_less_than_minimum_reverts() {
    e2e::init();
    let mut f = Fixture::new((to_wei(1000), to_wei(1000)), to_wei(1000), WAD);
    f.fund((to_wei(100), to_wei(50)));
    let before = f.onchain.ledger.state().clone();

    // only 50 of asset0 fit next to 50 of asset1
    let err = f
        .router
        .add_liquidity(
            &mut f.onchain.ledger,
            f.trader,
            &DepositInstruction {
                pool: f.pool,
                amount0_in: to_wei(100),
                amount1_in: to_wei(50),
                min_amount0_used: to_wei(51),
                min_amount1_used: U256::ZERO,
                recipient: f.trader,
            },
        )
        .unwrap_err();

    assert_eq!(
        err,
        Error::SlippageExceeded {
            token: f.dai,
            used: to_wei(50),
            minimum: to_wei(51),
        }
    );
    assert_eq!(f.onchain.ledger.state(), &before);
}

#[test]
fn withdrawal_returning_less_than_minimum_reverts() {
    e2e::init();
    let mut f = Fixture::new((to_wei(1000), to_wei(1000)), to_wei(1000), WAD);
    f.fund((to_wei(100), to_wei(100)));
    f.router
        .add_liquidity(
            &mut f.onchain.ledger,
            f.trader,
            &DepositInstruction {
                pool: f.pool,
                amount0_in: to_wei(100),
                amount1_in: to_wei(100),
                min_amount0_used: U256::ZERO,
                min_amount1_used: U256::ZERO,
                recipient: f.trader,
            },
        )
        .unwrap();
    let before = f.onchain.ledger.state().clone();

    let err = f
        .router
        .remove_liquidity(
            &mut f.onchain.ledger,
            f.trader,
            &WithdrawalInstruction {
                pool: f.pool,
                claim_amount: to_wei(100),
                min_amount0_out: U256::ZERO,
                min_amount1_out: to_wei(101),
                recipient: f.trader,
            },
        )
        .unwrap_err();

    assert!(matches!(err, Error::SlippageExceeded { token, .. } if token == f.weth));
    assert_eq!(f.onchain.ledger.state(), &before);
}

#[test]
fn invalid_rebalance_inputs_are_rejected() {
    e2e::init();
    let mut f = Fixture::new((to_wei(1000), to_wei(1000)), to_wei(1000), WAD);
    let request = |price, max_slippage_bps| router::RebalanceRequest {
        amount0_desired: to_wei(1),
        amount1_desired: U256::ZERO,
        price,
        max_slippage_bps,
    };

    let zero_price = f
        .router
        .rebalance_params(&mut f.onchain.ledger, f.pool, &request(U256::ZERO, 100));
    assert_eq!(zero_price, Err(Error::InvalidPrice));
    let slippage = f
        .router
        .rebalance_params(&mut f.onchain.ledger, f.pool, &request(WAD, 10_001));
    assert_eq!(slippage, Err(Error::InvalidSlippage(10_001)));
}
