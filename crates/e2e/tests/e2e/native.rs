use {
    alloy::primitives::U256,
    e2e::{Fixture, to_wei},
    number::{Bps, WAD},
    router::{
        DepositInstruction,
        Error,
        RebalanceRequest,
        WithdrawalInstruction,
        config::Convergence,
    },
};

fn half() -> U256 {
    WAD / U256::from(2)
}

#[tokio::test]
async fn native_only_deposit_and_native_withdrawal() {
    e2e::init();
    let mut f = Fixture::new((to_wei(1000), to_wei(500)), to_wei(1000), half());
    f.onchain.ledger.fund_native(f.trader, to_wei(1000));

    let reserves = f.reserves();
    let converged = conversion::converge(
        &f.provider,
        reserves,
        f.provider_tokens(true),
        RebalanceRequest {
            amount0_desired: U256::ZERO,
            amount1_desired: to_wei(1000),
            price: half(),
            max_slippage_bps: 50,
        },
        &Convergence::default(),
    )
    .await
    .unwrap();
    assert_eq!(converged.params.swap_amount, to_wei(500));
    let conversion = conversion::prepare(
        &f.provider,
        f.router.address(),
        f.provider_tokens(true),
        &converged,
        Bps::try_from(50_u16).unwrap(),
    )
    .await
    .unwrap();
    // native currency is attached, nothing to approve
    assert_eq!(conversion.instruction.targets, vec![f.provider.address]);

    let outcome = f
        .router
        .rebalance_and_add_liquidity_native(
            &mut f.onchain.ledger,
            f.trader,
            to_wei(1000),
            &DepositInstruction {
                pool: f.pool,
                amount0_in: U256::ZERO,
                amount1_in: to_wei(1000),
                min_amount0_used: to_wei(990),
                min_amount1_used: to_wei(495),
                recipient: f.trader,
            },
            &conversion,
        )
        .unwrap();
    assert_eq!(outcome.claim_minted, to_wei(1000));
    assert_eq!(f.onchain.native_balance(f.trader), U256::ZERO);
    f.assert_router_clean();

    let withdrawal = f
        .router
        .remove_liquidity_native(
            &mut f.onchain.ledger,
            f.trader,
            &WithdrawalInstruction {
                pool: f.pool,
                claim_amount: to_wei(1000),
                min_amount0_out: to_wei(1000),
                min_amount1_out: to_wei(500),
                recipient: f.trader,
            },
        )
        .unwrap();
    assert_eq!((withdrawal.amount0, withdrawal.amount1), (to_wei(1000), to_wei(500)));
    assert_eq!(f.balances(f.trader), (to_wei(1000), U256::ZERO));
    assert_eq!(f.onchain.native_balance(f.trader), to_wei(500));
    f.assert_router_clean();
}

#[tokio::test]
async fn native_received_from_conversion_is_wrapped() {
    e2e::init();
    let mut f = Fixture::new((to_wei(1000), to_wei(500)), to_wei(1000), half());
    f.fund((to_wei(2000), U256::ZERO));

    let reserves = f.reserves();
    let converged = conversion::converge(
        &f.provider,
        reserves,
        f.provider_tokens(true),
        RebalanceRequest {
            amount0_desired: to_wei(2000),
            amount1_desired: U256::ZERO,
            price: half(),
            max_slippage_bps: 100,
        },
        &Convergence::default(),
    )
    .await
    .unwrap();
    assert!(converged.params.zero_for_one);
    assert_eq!(converged.params.swap_amount, to_wei(1000));
    let conversion = conversion::prepare(
        &f.provider,
        f.router.address(),
        f.provider_tokens(true),
        &converged,
        Bps::try_from(100_u16).unwrap(),
    )
    .await
    .unwrap();

    let outcome = f
        .router
        .rebalance_and_add_liquidity_native(
            &mut f.onchain.ledger,
            f.trader,
            U256::ZERO,
            &DepositInstruction {
                pool: f.pool,
                amount0_in: to_wei(2000),
                amount1_in: U256::ZERO,
                min_amount0_used: U256::ZERO,
                min_amount1_used: U256::ZERO,
                recipient: f.trader,
            },
            &conversion,
        )
        .unwrap();

    assert_eq!(outcome.amount0_used, to_wei(1000));
    assert_eq!(outcome.amount1_used, to_wei(500));
    assert_eq!(f.claims(f.trader), to_wei(1000));
    f.assert_router_clean();
}

#[test]
fn native_refund_to_contract_without_receive_reverts() {
    e2e::init();
    let mut f = Fixture::new((to_wei(1000), to_wei(1000)), to_wei(1000), WAD);
    let caller = f.onchain.deploy_rejecting_receiver();
    f.onchain.mint(f.dai, caller, to_wei(1));
    f.onchain.ledger.fund_native(caller, to_wei(2));
    f.onchain.approve(f.dai, caller, f.router.address(), U256::MAX);
    let before = f.onchain.ledger.state().clone();

    let err = f
        .router
        .add_liquidity_native(
            &mut f.onchain.ledger,
            caller,
            to_wei(2),
            &DepositInstruction {
                pool: f.pool,
                amount0_in: to_wei(1),
                amount1_in: to_wei(2),
                min_amount0_used: U256::ZERO,
                min_amount1_used: U256::ZERO,
                recipient: caller,
            },
        )
        .unwrap_err();

    assert!(matches!(err, Error::NativeTransferFailed { recipient, .. } if recipient == caller));
    assert_eq!(f.onchain.ledger.state(), &before);
}
