//! Mainnet addresses of the assets and contracts the router was first
//! deployed against.

use alloy::primitives::{Address, address};

/// Address for the `WETH` token.
pub const WETH: Address = address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");

/// Address for the `DAI` token.
pub const DAI: Address = address!("0x6B175474E89094C44Da98b954EedeAC495271d0F");

/// Address for the `USDC` token.
pub const USDC: Address = address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");

/// Address of the WETH/DAI vault position.
pub const VAULT_WETH_DAI: Address = address!("0x810F9C4613f466F02cC7Da671a3ba9a7e8c33c69");

/// Address of the 1inch v3 aggregation router.
pub const ONEINCH_ROUTER_V3: Address = address!("0x11111112542D85B3EF69AE05771c2dCCff4fAa26");
