//! ABI bindings of every contract the router talks to.
//!
//! Each binding lives in a module named after the interface and exposes the
//! generated call structs (`IERC20::transferCall`, ...) as well as the
//! `<Interface>Calls` enum used to dispatch raw calldata.

use alloy::primitives::{Address, address};

/// Placeholder address conversion providers use for the chain's native
/// currency.
pub const NATIVE_TOKEN: Address = address!("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

macro_rules! bindings {
    ($($item:tt)*) => {
        alloy::sol! {
            #![sol(all_derives)]
            $($item)*
        }
    };
}

bindings! {
    interface IERC20 {
        function totalSupply() external view returns (uint256 supply);
        function balanceOf(address owner) external view returns (uint256 balance);
        function allowance(address owner, address spender)
            external view returns (uint256 remaining);
        function approve(address spender, uint256 amount) external returns (bool success);
        function transfer(address to, uint256 amount) external returns (bool success);
        function transferFrom(address from, address to, uint256 amount)
            external returns (bool success);
    }
}

bindings! {
    interface IWETH9 {
        function deposit() external payable;
        function withdraw(uint256 amount) external;
    }
}

bindings! {
    /// A two asset concentrated liquidity position. The pool contract is also
    /// the ERC20 claim token of the position.
    interface IVaultPool {
        function token0() external view returns (address token);
        function token1() external view returns (address token);
        function getUnderlyingBalances()
            external view returns (uint256 amount0Current, uint256 amount1Current);
        function getMintAmounts(uint256 amount0Max, uint256 amount1Max)
            external view returns (uint256 amount0, uint256 amount1, uint256 mintAmount);
        function mint(uint256 amount0Max, uint256 amount1Max, address receiver)
            external returns (uint256 amount0, uint256 amount1, uint256 mintAmount);
        function burn(uint256 burnAmount, address receiver)
            external returns (uint256 amount0, uint256 amount1);
    }
}

bindings! {
    /// Minimal aggregation router: pulls `amountIn` of `tokenIn` from the
    /// caller (or takes the attached value for the native currency) and pays
    /// out `tokenOut` to the caller.
    interface ISwapRouter {
        function swap(address tokenIn, address tokenOut, uint256 amountIn, uint256 minAmountOut)
            external payable returns (uint256 amountOut);
    }
}
