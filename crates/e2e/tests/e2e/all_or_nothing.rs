use {
    alloy::{
        primitives::{Address, U256},
        sol_types::SolCall,
    },
    contracts::ISwapRouter,
    e2e::{Fixture, to_wei},
    number::WAD,
    router::{Conversion, ConversionInstruction, DepositInstruction, Error},
};

fn deposit(f: &Fixture) -> DepositInstruction {
    DepositInstruction {
        pool: f.pool,
        amount0_in: to_wei(1000),
        amount1_in: to_wei(2000),
        min_amount0_used: U256::ZERO,
        min_amount1_used: U256::ZERO,
        recipient: f.trader,
    }
}

#[test]
fn reverting_final_call_undoes_everything() {
    e2e::init();
    let mut f = Fixture::new((to_wei(1000), to_wei(500)), to_wei(1000), WAD / U256::from(2));
    f.fund((to_wei(1000), to_wei(2000)));
    let before = f.onchain.ledger.state().clone();

    let mut instruction = ConversionInstruction::default();
    instruction.push(
        f.provider.address,
        ISwapRouter::swapCall {
            tokenIn: f.weth,
            // the swapper has no route into this token
            tokenOut: Address::repeat_byte(0x42),
            amountIn: to_wei(750),
            minAmountOut: U256::ZERO,
        }
        .abi_encode(),
    );
    let request = deposit(&f);
    let err = f
        .router
        .rebalance_and_add_liquidity(
            &mut f.onchain.ledger,
            f.trader,
            &request,
            &Conversion {
                zero_for_one: false,
                swap_amount: to_wei(750),
                instruction,
            },
        )
        .unwrap_err();

    match err {
        Error::CallReverted { index, target, reason } => {
            assert_eq!(index, 0);
            assert_eq!(target, f.provider.address);
            assert_eq!(reason.reason(), "unsupported pair");
        }
        err => panic!("unexpected error {err:?}"),
    }
    assert_eq!(f.onchain.ledger.state(), &before);
    assert_eq!(f.balances(f.trader), (to_wei(1000), to_wei(2000)));
}

#[test]
fn mismatched_instruction_is_rejected() {
    e2e::init();
    let mut f = Fixture::new((to_wei(1000), to_wei(500)), to_wei(1000), WAD / U256::from(2));
    f.fund((to_wei(1000), to_wei(2000)));

    let request = deposit(&f);
    let err = f
        .router
        .rebalance_and_add_liquidity(
            &mut f.onchain.ledger,
            f.trader,
            &request,
            &Conversion {
                zero_for_one: false,
                swap_amount: to_wei(750),
                instruction: ConversionInstruction {
                    targets: vec![f.weth, f.provider.address],
                    payloads: vec![Default::default()],
                },
            },
        )
        .unwrap_err();

    assert_eq!(
        err,
        Error::ArrayLengthMismatch {
            targets: 2,
            payloads: 1,
        }
    );
    assert_eq!(f.balances(f.trader), (to_wei(1000), to_wei(2000)));
}

#[test]
fn conversion_returning_nothing_is_rejected() {
    e2e::init();
    let mut f = Fixture::new((to_wei(1000), to_wei(500)), to_wei(1000), WAD / U256::from(2));
    f.fund((to_wei(1000), to_wei(2000)));

    // an approval alone moves no funds
    let mut instruction = ConversionInstruction::default();
    instruction.push(
        f.weth,
        contracts::IERC20::approveCall {
            spender: f.provider.address,
            amount: to_wei(750),
        }
        .abi_encode(),
    );
    let request = deposit(&f);
    let err = f
        .router
        .rebalance_and_add_liquidity(
            &mut f.onchain.ledger,
            f.trader,
            &request,
            &Conversion {
                zero_for_one: false,
                swap_amount: to_wei(750),
                instruction,
            },
        )
        .unwrap_err();

    assert_eq!(
        err,
        Error::SwapAmountMismatch {
            spent: U256::ZERO,
            swap_amount: to_wei(750),
            received: U256::ZERO,
        }
    );
    let allowance = f
        .onchain
        .ledger
        .state()
        .allowance(f.weth, f.router.address(), f.provider.address);
    assert_eq!(allowance, U256::ZERO);
}
