use {
    alloy::{
        primitives::{Address, Bytes, U256},
        sol_types::SolCall,
    },
    contracts::ISwapRouter,
    e2e::{Fixture, to_wei},
    number::WAD,
    router::{
        Conversion,
        ConversionInstruction,
        DepositInstruction,
        Error,
        RebalanceRequest,
        Router,
        config::Config,
    },
    std::io::Write,
    tempfile::NamedTempFile,
};

async fn load(f: &Fixture) -> Config {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        router = "{:?}"
        wrapped-native = "{:?}"
        allowed-targets = ["{:?}"]
        default-slippage = 50

        [convergence]
        max-iterations = 3
        timeout = "2s"

        [logging]
        env-filter = "debug"
        "#,
        f.router.address(),
        f.weth,
        f.provider.address,
    )
    .unwrap();
    router::config::load(file.path()).await
}

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

#[tokio::test]
async fn router_from_config_only_calls_allowed_targets() {
    e2e::init();
    let mut f = Fixture::new((to_wei(1000), to_wei(500)), to_wei(1000), WAD / U256::from(2));
    f.fund((to_wei(1000), to_wei(2000)));

    let config = load(&f).await;
    assert_eq!(config.default_slippage.get(), 50);
    assert_eq!(config.convergence.max_iterations, 3);
    let router = Router::from_config(&config);
    assert_eq!(router.address(), f.router.address());

    let stranger = Address::repeat_byte(0x99);
    let mut instruction = ConversionInstruction::default();
    instruction.push(stranger, Bytes::new());
    let request = deposit(&f);
    let err = router
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

    assert_eq!(err, Error::TargetNotAllowed(stranger));
}

#[tokio::test]
async fn planned_conversion_uses_configured_slippage() {
    e2e::init();
    let price = WAD / U256::from(2);
    let mut f = Fixture::new((to_wei(1000), to_wei(500)), to_wei(1000), price);
    f.fund((to_wei(1000), to_wei(2000)));
    let config = load(&f).await;
    let router = Router::from_config(&config);

    let reserves = f.reserves();
    let plan = conversion::plan(
        &f.provider,
        &config,
        reserves,
        f.provider_tokens(false),
        RebalanceRequest {
            amount0_desired: to_wei(1000),
            amount1_desired: to_wei(2000),
            price: WAD,
            max_slippage_bps: 100,
        },
        None,
    )
    .await
    .unwrap();
    assert_eq!(plan.converged.price, price);

    let swap = plan.conversion.instruction.payloads.last().unwrap();
    let swap = ISwapRouter::swapCall::abi_decode(swap).unwrap();
    assert_eq!(swap.amountIn, to_wei(750));
    // 1500 expected minus the configured 0.5%
    assert_eq!(swap.minAmountOut, to_wei(14925) / U256::from(10));

    let request = deposit(&f);
    let outcome = router
        .rebalance_and_add_liquidity(&mut f.onchain.ledger, f.trader, &request, &plan.conversion)
        .unwrap();

    assert_eq!(outcome.claim_minted, to_wei(2500));
    f.assert_router_clean();
}
