use {
    alloy::primitives::U256,
    e2e::Fixture,
    number::WAD,
    router::{DepositInstruction, WithdrawalInstruction},
};

/// Odd reserves so that every division rounds.
#[test]
fn withdrawal_never_returns_more_than_deposited() {
    e2e::init();
    let mut f = Fixture::new((U256::from(1001), U256::from(333)), U256::from(997), WAD);
    for (amount0, amount1) in [(100, 34), (7, 3), (1000, 1), (55, 55)] {
        let deposited = (U256::from(amount0), U256::from(amount1));
        f.fund(deposited);
        let before = f.balances(f.trader);

        let outcome = f
            .router
            .add_liquidity(
                &mut f.onchain.ledger,
                f.trader,
                &DepositInstruction {
                    pool: f.pool,
                    amount0_in: deposited.0,
                    amount1_in: deposited.1,
                    min_amount0_used: U256::ZERO,
                    min_amount1_used: U256::ZERO,
                    recipient: f.trader,
                },
            )
            .unwrap();
        f.assert_router_clean();

        let withdrawn = f
            .router
            .remove_liquidity(
                &mut f.onchain.ledger,
                f.trader,
                &WithdrawalInstruction {
                    pool: f.pool,
                    claim_amount: outcome.claim_minted,
                    min_amount0_out: U256::ZERO,
                    min_amount1_out: U256::ZERO,
                    recipient: f.trader,
                },
            )
            .unwrap();
        f.assert_router_clean();

        assert!(withdrawn.amount0 <= outcome.amount0_used);
        assert!(withdrawn.amount1 <= outcome.amount1_used);
        let after = f.balances(f.trader);
        assert!(after.0 <= before.0 && after.1 <= before.1);
        assert_eq!(f.claims(f.trader), U256::ZERO);
    }
}
