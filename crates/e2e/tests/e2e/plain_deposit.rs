use {
    alloy::primitives::U256,
    e2e::{Fixture, to_wei},
    number::WAD,
    router::DepositInstruction,
};

#[test]
fn balanced_deposit_is_fully_used() {
    e2e::init();
    let mut f = Fixture::new((to_wei(1000), to_wei(1000)), to_wei(1000), WAD);
    f.fund((to_wei(1000), to_wei(1000)));

    let preview = f
        .router
        .mint_amounts(&mut f.onchain.ledger, f.pool, to_wei(1000), to_wei(1000))
        .unwrap();
    let outcome = f
        .router
        .add_liquidity(
            &mut f.onchain.ledger,
            f.trader,
            &DepositInstruction {
                pool: f.pool,
                amount0_in: to_wei(1000),
                amount1_in: to_wei(1000),
                min_amount0_used: preview.amount0,
                min_amount1_used: preview.amount1,
                recipient: f.trader,
            },
        )
        .unwrap();

    assert_eq!(outcome.amount0_used, to_wei(1000));
    assert_eq!(outcome.amount1_used, to_wei(1000));
    assert_eq!(outcome.claim_minted, preview.mint_amount);
    assert_eq!(f.claims(f.trader), to_wei(1000));
    assert_eq!(f.balances(f.trader), (U256::ZERO, U256::ZERO));
    assert_eq!(f.reserves(), (to_wei(2000), to_wei(2000)));
    f.assert_router_clean();
}

#[test]
fn claims_can_be_minted_for_someone_else() {
    e2e::init();
    let mut f = Fixture::new((to_wei(1000), to_wei(1000)), to_wei(1000), WAD);
    f.fund((to_wei(10), to_wei(10)));
    let friend = f.onchain.make_account();

    f.router
        .add_liquidity(
            &mut f.onchain.ledger,
            f.trader,
            &DepositInstruction {
                pool: f.pool,
                amount0_in: to_wei(10),
                amount1_in: to_wei(10),
                min_amount0_used: U256::ZERO,
                min_amount1_used: U256::ZERO,
                recipient: friend,
            },
        )
        .unwrap();

    assert_eq!(f.claims(friend), to_wei(10));
    assert_eq!(f.claims(f.trader), U256::ZERO);
    f.assert_router_clean();
}

#[test]
fn underlying_balances_are_proportional() {
    e2e::init();
    let mut f = Fixture::new((to_wei(1000), to_wei(500)), to_wei(100), WAD);

    let one = f
        .router
        .underlying_balances(&mut f.onchain.ledger, f.pool, to_wei(1))
        .unwrap();
    let ten = f
        .router
        .underlying_balances(&mut f.onchain.ledger, f.pool, to_wei(10))
        .unwrap();
    let supply = f.total_claims();
    let all = f
        .router
        .underlying_balances(&mut f.onchain.ledger, f.pool, supply)
        .unwrap();

    assert_eq!(one, (to_wei(10), to_wei(5)));
    assert_eq!(ten, (one.0 * U256::from(10), one.1 * U256::from(10)));
    assert_eq!(all, f.reserves());
}
