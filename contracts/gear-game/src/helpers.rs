use cosmwasm_std::{Addr, Deps, MessageInfo, Storage, Uint128, Uint256};

use crate::error::ContractError;
use crate::state::{Gear, BALANCES, CONFIG, MINTERS, PAUSERS};

pub fn assert_admin(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.admin {
        return Err(ContractError::Unauthorized {
            role: "admin".to_string(),
        });
    }
    Ok(())
}

/// The admin does not implicitly hold the minter role; it must grant the
/// role to itself like any other account.
pub fn assert_minter(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    if !MINTERS.may_load(deps.storage, sender)?.unwrap_or(false) {
        return Err(ContractError::Unauthorized {
            role: "minter".to_string(),
        });
    }
    Ok(())
}

pub fn assert_pauser(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    if !PAUSERS.may_load(deps.storage, sender)?.unwrap_or(false) {
        return Err(ContractError::Unauthorized {
            role: "pauser".to_string(),
        });
    }
    Ok(())
}

pub fn assert_not_paused(deps: Deps) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }
    Ok(())
}

pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}

/// Require exactly one coin of `denom` attached and return its amount.
pub fn extract_payment(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
    if info.funds.is_empty() {
        return Err(ContractError::NoFundsSent);
    }
    if info.funds.len() > 1 {
        return Err(ContractError::MultipleDenomsSent);
    }
    let sent = &info.funds[0];
    if sent.denom != denom {
        return Err(ContractError::WrongDenom {
            expected: denom.to_string(),
            got: sent.denom.clone(),
        });
    }
    Ok(sent.amount)
}

pub fn mint_cost(rate: Uint128, amount: Uint128) -> Result<Uint128, ContractError> {
    rate.checked_mul(amount).map_err(|_| ContractError::Overflow)
}

/// Derive the roll in [1,100] from the oracle's random word. A zero word is
/// the forced-loss edge case and produces no roll at all.
pub fn resolve_roll(random_word: Uint256) -> Option<u8> {
    if random_word.is_zero() {
        return None;
    }
    let rem = random_word % Uint256::from(100u32);
    // rem < 100, so the value fits in the low byte
    Some(rem.to_be_bytes()[31] + 1)
}

pub fn load_balance(
    storage: &dyn Storage,
    owner: &Addr,
    gear: Gear,
) -> Result<Uint128, ContractError> {
    Ok(BALANCES
        .may_load(storage, (owner, gear.key()))?
        .unwrap_or_default())
}

pub fn credit_balance(
    storage: &mut dyn Storage,
    owner: &Addr,
    gear: Gear,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let balance = load_balance(storage, owner, gear)?;
    let updated = balance
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow)?;
    BALANCES.save(storage, (owner, gear.key()), &updated)?;
    Ok(updated)
}

pub fn debit_balance(
    storage: &mut dyn Storage,
    owner: &Addr,
    gear: Gear,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let balance = load_balance(storage, owner, gear)?;
    let updated = balance
        .checked_sub(amount)
        .map_err(|_| ContractError::InsufficientBalance {
            gear: gear.to_string(),
            balance: balance.to_string(),
            required: amount.to_string(),
        })?;
    BALANCES.save(storage, (owner, gear.key()), &updated)?;
    Ok(updated)
}
