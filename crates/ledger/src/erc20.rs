//! ERC20 token semantics on top of the ledger state.
//!
//! The free functions implement the token rules so that contracts which are
//! tokens themselves (wrapped native currency, vault pools) can share them.

use {
    crate::{Context, Contract, Ledger, Revert, decode},
    alloy::{
        primitives::{Address, Bytes, U256},
        sol_types::SolCall,
    },
    contracts::IERC20::{self, IERC20Calls},
};

pub fn balance_of(ledger: &Ledger, token: Address, owner: Address) -> U256 {
    ledger.state().balance(token, owner)
}

pub fn total_supply(ledger: &Ledger, token: Address) -> U256 {
    ledger.state().total_supply(token)
}

pub fn transfer(
    ledger: &mut Ledger,
    token: Address,
    from: Address,
    to: Address,
    amount: U256,
) -> Result<(), Revert> {
    let state = ledger.state_mut();
    let remaining = state
        .balance(token, from)
        .checked_sub(amount)
        .ok_or_else(|| Revert::new("ERC20: transfer amount exceeds balance"))?;
    state.set_balance(token, from, remaining);
    // cannot overflow: the total supply bounds every balance
    let credited = state.balance(token, to) + amount;
    state.set_balance(token, to, credited);
    Ok(())
}

pub fn mint(ledger: &mut Ledger, token: Address, to: Address, amount: U256) -> Result<(), Revert> {
    let state = ledger.state_mut();
    let supply = state
        .total_supply(token)
        .checked_add(amount)
        .ok_or_else(|| Revert::new("ERC20: total supply overflow"))?;
    state.set_total_supply(token, supply);
    let balance = state.balance(token, to) + amount;
    state.set_balance(token, to, balance);
    Ok(())
}

pub fn burn(
    ledger: &mut Ledger,
    token: Address,
    from: Address,
    amount: U256,
) -> Result<(), Revert> {
    let state = ledger.state_mut();
    let remaining = state
        .balance(token, from)
        .checked_sub(amount)
        .ok_or_else(|| Revert::new("ERC20: burn amount exceeds balance"))?;
    state.set_balance(token, from, remaining);
    let supply = state.total_supply(token) - amount;
    state.set_total_supply(token, supply);
    Ok(())
}

pub fn approve(
    ledger: &mut Ledger,
    token: Address,
    owner: Address,
    spender: Address,
    amount: U256,
) {
    ledger
        .state_mut()
        .set_allowance(token, owner, spender, amount);
}

/// Consumes allowance. An allowance of `U256::MAX` is never decreased.
pub fn spend_allowance(
    ledger: &mut Ledger,
    token: Address,
    owner: Address,
    spender: Address,
    amount: U256,
) -> Result<(), Revert> {
    let allowance = ledger.state().allowance(token, owner, spender);
    if allowance == U256::MAX {
        return Ok(());
    }
    let remaining = allowance
        .checked_sub(amount)
        .ok_or_else(|| Revert::new("ERC20: insufficient allowance"))?;
    approve(ledger, token, owner, spender, remaining);
    Ok(())
}

/// Executes an ERC20 call against the token at `ctx.this`.
pub fn dispatch(ledger: &mut Ledger, ctx: &Context, call: IERC20Calls) -> Result<Bytes, Revert> {
    ctx.ensure_not_payable()?;
    let token = ctx.this;
    let output = match call {
        IERC20Calls::totalSupply(_) => {
            IERC20::totalSupplyCall::abi_encode_returns(&total_supply(ledger, token))
        }
        IERC20Calls::balanceOf(call) => {
            IERC20::balanceOfCall::abi_encode_returns(&balance_of(ledger, token, call.owner))
        }
        IERC20Calls::allowance(call) => IERC20::allowanceCall::abi_encode_returns(
            &ledger.state().allowance(token, call.owner, call.spender),
        ),
        IERC20Calls::approve(call) => {
            approve(ledger, token, ctx.sender, call.spender, call.amount);
            IERC20::approveCall::abi_encode_returns(&true)
        }
        IERC20Calls::transfer(call) => {
            transfer(ledger, token, ctx.sender, call.to, call.amount)?;
            IERC20::transferCall::abi_encode_returns(&true)
        }
        IERC20Calls::transferFrom(call) => {
            spend_allowance(ledger, token, call.from, ctx.sender, call.amount)?;
            transfer(ledger, token, call.from, call.to, call.amount)?;
            IERC20::transferFromCall::abi_encode_returns(&true)
        }
    };
    Ok(output.into())
}

/// A plain ERC20 token.
#[derive(Debug)]
pub struct Erc20 {
    pub symbol: String,
}

impl Erc20 {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_owned(),
        }
    }
}

impl Contract for Erc20 {
    fn call(&self, ledger: &mut Ledger, ctx: Context, input: &[u8]) -> Result<Bytes, Revert> {
        dispatch(ledger, &ctx, decode(input)?)
    }
}
