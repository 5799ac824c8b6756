use cosmwasm_std::{
    to_json_binary, BankMsg, Binary, Coin, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
    Uint128, Uint256, WasmMsg,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::helpers::*;
use crate::msg::*;
use crate::state::*;

const CONTRACT_NAME: &str = "crates.io:gear-game";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Units of `gear_to_mint` awarded per winning burn request
const AWARD_PER_WIN: Uint128 = Uint128::new(1);

// ─── Instantiate ────────────────────────────────────────────────────────────

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.burn_threshold_percent > 100 {
        return Err(ContractError::InvalidThreshold {
            threshold: msg.burn_threshold_percent,
        });
    }
    if msg.mint_rates.len() != Gear::ALL.len() {
        return Err(ContractError::InvalidRateCount {
            expected: Gear::ALL.len(),
            got: msg.mint_rates.len(),
        });
    }

    let admin = deps.api.addr_validate(&msg.admin)?;
    let oracle = deps.api.addr_validate(&msg.oracle)?;

    let config = Config {
        admin,
        oracle,
        oracle_fee: msg.oracle_fee,
        mint_denom: msg.mint_denom,
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;

    BURN_CONFIG.save(
        deps.storage,
        &BurnGearConfig {
            threshold_percent: msg.burn_threshold_percent,
            gear_to_burn: msg.gear_to_burn,
            gear_to_mint: msg.gear_to_mint,
        },
    )?;
    PUBLIC_MINT.save(
        deps.storage,
        &PublicMintConfig {
            max_supply: msg.max_public_supply,
            rates: msg.mint_rates,
        },
    )?;
    MINTED_PUBLICLY.save(deps.storage, &Uint128::zero())?;
    REQUEST_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("admin", config.admin.as_str())
        .add_attribute("oracle", config.oracle.as_str()))
}

// ─── Execute: Minting ───────────────────────────────────────────────────────

pub fn execute_mint(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipient: String,
    gear: Gear,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    assert_minter(deps.as_ref(), &info.sender)?;

    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let recipient = deps.api.addr_validate(&recipient)?;
    let balance = credit_balance(deps.storage, &recipient, gear, amount)?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("recipient", recipient.as_str())
        .add_attribute("gear", gear.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("balance", balance.to_string()))
}

pub fn execute_public_mint(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    gear: Gear,
    amount: Uint128,
) -> Result<Response, ContractError> {
    assert_not_paused(deps.as_ref())?;

    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let config = CONFIG.load(deps.storage)?;
    let public_mint = PUBLIC_MINT.load(deps.storage)?;
    let minted = MINTED_PUBLICLY.load(deps.storage)?;

    let available = public_mint.max_supply.saturating_sub(minted);
    if amount > available {
        return Err(ContractError::PublicSupplyExhausted {
            available: available.to_string(),
        });
    }

    let rate = public_mint.rates[gear.key() as usize];
    let required = mint_cost(rate, amount)?;
    let sent = extract_payment(&info, &config.mint_denom)?;
    if sent < required {
        return Err(ContractError::InsufficientPayment {
            required: required.to_string(),
            sent: sent.to_string(),
        });
    }

    MINTED_PUBLICLY.save(
        deps.storage,
        &minted.checked_add(amount).map_err(|_| ContractError::Overflow)?,
    )?;
    let balance = credit_balance(deps.storage, &info.sender, gear, amount)?;

    Ok(Response::new()
        .add_attribute("action", "public_mint")
        .add_attribute("buyer", info.sender.as_str())
        .add_attribute("gear", gear.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("paid", sent.to_string())
        .add_attribute("balance", balance.to_string()))
}

// ─── Execute: Burn For Upgrade ──────────────────────────────────────────────

pub fn execute_burn_to_gain_gear(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    gear: Gear,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let config = CONFIG.load(deps.storage)?;
    let burn_config = BURN_CONFIG.load(deps.storage)?;

    if gear != burn_config.gear_to_burn {
        return Err(ContractError::WrongGearToBurn {
            expected: burn_config.gear_to_burn.to_string(),
            got: gear.to_string(),
        });
    }

    if let Some(request_id) =
        PENDING_BURNS.may_load(deps.storage, (&info.sender, gear.key()))?
    {
        return Err(ContractError::DuplicatePendingRequest {
            gear: gear.to_string(),
            request_id,
        });
    }

    // The randomness request must not go out unless the oracle fee is
    // covered; an underfunded submission fails here, loudly, with no burn.
    if !config.oracle_fee.amount.is_zero() {
        let funding = deps
            .querier
            .query_balance(&env.contract.address, &config.oracle_fee.denom)?
            .amount;
        if funding < config.oracle_fee.amount {
            return Err(ContractError::InsufficientOracleFunds {
                needed: config.oracle_fee.amount.to_string(),
                available: funding.to_string(),
            });
        }
    }

    // The burn is immediate and irreversible. A losing roll later refunds
    // nothing; only a win adds the new gear.
    debit_balance(deps.storage, &info.sender, gear, amount)?;

    let request_id = REQUEST_COUNT.load(deps.storage)? + 1;
    REQUEST_COUNT.save(deps.storage, &request_id)?;

    let request = BurnRequest {
        requester: info.sender.clone(),
        gear_burned: gear,
        amount_burned: amount,
        gear_to_mint: burn_config.gear_to_mint,
        threshold_percent: burn_config.threshold_percent,
        status: RequestStatus::Pending,
        outcome: None,
    };
    REQUESTS.save(deps.storage, request_id, &request)?;
    PENDING_BURNS.save(deps.storage, (&info.sender, gear.key()), &request_id)?;

    let funds = if config.oracle_fee.amount.is_zero() {
        vec![]
    } else {
        vec![config.oracle_fee.clone()]
    };
    let oracle_msg = WasmMsg::Execute {
        contract_addr: config.oracle.into_string(),
        msg: to_json_binary(&OracleExecuteMsg::RequestRandomness { job_id: request_id })?,
        funds,
    };

    Ok(Response::new()
        .add_message(oracle_msg)
        .add_attribute("action", "burn_to_gain_gear")
        .add_attribute("requester", info.sender.as_str())
        .add_attribute("gear_burned", gear.to_string())
        .add_attribute("amount_burned", amount.to_string())
        .add_attribute("request_id", request_id.to_string()))
}

pub fn execute_receive_randomness(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    request_id: u64,
    random_word: Uint256,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    // Anyone else delivering a "random" word could pick the outcome, so the
    // callback is restricted to the configured oracle address. Callbacks are
    // deliberately not blocked by a pause: in-flight requests must settle.
    if info.sender != config.oracle {
        return Err(ContractError::Unauthorized {
            role: "oracle".to_string(),
        });
    }

    let mut request = match REQUESTS.may_load(deps.storage, request_id)? {
        Some(request) if request.status == RequestStatus::Pending => request,
        _ => return Err(ContractError::UnknownOrAlreadyResolvedRequest { request_id }),
    };

    // Settle against the snapshot taken at request time; the live config has
    // no say over requests already in flight.
    let roll = resolve_roll(random_word);
    let won = roll.is_some_and(|roll| roll < request.threshold_percent);

    if won {
        credit_balance(deps.storage, &request.requester, request.gear_to_mint, AWARD_PER_WIN)?;
    }

    request.status = RequestStatus::Fulfilled;
    request.outcome = Some(BurnOutcome {
        random_word,
        roll,
        won,
    });
    REQUESTS.save(deps.storage, request_id, &request)?;
    PENDING_BURNS.remove(
        deps.storage,
        (&request.requester, request.gear_burned.key()),
    );

    Ok(Response::new()
        .add_attribute("action", "receive_randomness")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("requester", request.requester.as_str())
        .add_attribute(
            "roll",
            roll.map(|roll| roll.to_string())
                .unwrap_or_else(|| "forced_loss".to_string()),
        )
        .add_attribute("won", won.to_string()))
}

// ─── Execute: Admin Parameters ──────────────────────────────────────────────

pub fn execute_set_burn_gear_parameters(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    threshold_percent: u8,
    gear_to_burn: Gear,
    gear_to_mint: Gear,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    if threshold_percent > 100 {
        return Err(ContractError::InvalidThreshold {
            threshold: threshold_percent,
        });
    }

    BURN_CONFIG.save(
        deps.storage,
        &BurnGearConfig {
            threshold_percent,
            gear_to_burn,
            gear_to_mint,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "set_burn_gear_parameters")
        .add_attribute("threshold_percent", threshold_percent.to_string())
        .add_attribute("gear_to_burn", gear_to_burn.to_string())
        .add_attribute("gear_to_mint", gear_to_mint.to_string()))
}

pub fn execute_set_public_mint_parameters(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    max_supply: Uint128,
    rates: Vec<Uint128>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    if rates.len() != Gear::ALL.len() {
        return Err(ContractError::InvalidRateCount {
            expected: Gear::ALL.len(),
            got: rates.len(),
        });
    }

    PUBLIC_MINT.save(deps.storage, &PublicMintConfig { max_supply, rates })?;

    Ok(Response::new()
        .add_attribute("action", "set_public_mint_parameters")
        .add_attribute("max_supply", max_supply.to_string()))
}

pub fn execute_grant_role(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    role: Role,
    account: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    let account = deps.api.addr_validate(&account)?;
    let (map, label) = match role {
        Role::Minter => (MINTERS, "minter"),
        Role::Pauser => (PAUSERS, "pauser"),
    };
    map.save(deps.storage, &account, &true)?;

    Ok(Response::new()
        .add_attribute("action", "grant_role")
        .add_attribute("role", label)
        .add_attribute("account", account.as_str()))
}

pub fn execute_revoke_role(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    role: Role,
    account: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    let account = deps.api.addr_validate(&account)?;
    let (map, label) = match role {
        Role::Minter => (MINTERS, "minter"),
        Role::Pauser => (PAUSERS, "pauser"),
    };
    map.remove(deps.storage, &account);

    Ok(Response::new()
        .add_attribute("action", "revoke_role")
        .add_attribute("role", label)
        .add_attribute("account", account.as_str()))
}

pub fn execute_pause(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_pauser(deps.as_ref(), &info.sender)?;

    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.paused = true;
        Ok(c)
    })?;

    Ok(Response::new().add_attribute("action", "pause"))
}

pub fn execute_unpause(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_pauser(deps.as_ref(), &info.sender)?;

    let config = CONFIG.load(deps.storage)?;
    if !config.paused {
        return Err(ContractError::NotPaused);
    }

    CONFIG.update(deps.storage, |mut c| -> StdResult<_> {
        c.paused = false;
        Ok(c)
    })?;

    Ok(Response::new().add_attribute("action", "unpause"))
}

// ─── Execute: Treasury ──────────────────────────────────────────────────────

pub fn execute_fund_oracle_fees(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let sent = extract_payment(&info, &config.oracle_fee.denom)?;

    if sent.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let balance = deps
        .querier
        .query_balance(&env.contract.address, &config.oracle_fee.denom)?
        .amount;

    Ok(Response::new()
        .add_attribute("action", "fund_oracle_fees")
        .add_attribute("amount", sent.to_string())
        .add_attribute("balance", balance.to_string()))
}

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_admin(deps.as_ref(), &info.sender)?;

    let config = CONFIG.load(deps.storage)?;
    let balance = deps
        .querier
        .query_balance(&env.contract.address, &config.mint_denom)?
        .amount;

    if balance.is_zero() {
        return Err(ContractError::NothingToWithdraw);
    }

    let msg = BankMsg::Send {
        to_address: info.sender.to_string(),
        amount: vec![Coin {
            denom: config.mint_denom,
            amount: balance,
        }],
    };

    Ok(Response::new()
        .add_message(msg)
        .add_attribute("action", "withdraw")
        .add_attribute("amount", balance.to_string()))
}

// ─── Queries ────────────────────────────────────────────────────────────────

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&CONFIG.load(deps.storage)?)
}

pub fn query_burn_gear_parameters(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&BURN_CONFIG.load(deps.storage)?)
}

pub fn query_public_mint_info(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let public_mint = PUBLIC_MINT.load(deps.storage)?;
    let minted = MINTED_PUBLICLY.load(deps.storage)?;

    to_json_binary(&PublicMintInfoResponse {
        max_supply: public_mint.max_supply,
        minted,
        remaining: public_mint.max_supply.saturating_sub(minted),
        rates: public_mint.rates,
        denom: config.mint_denom,
    })
}

pub fn query_balance(deps: Deps, owner: String, gear: Gear) -> StdResult<Binary> {
    let owner = deps.api.addr_validate(&owner)?;
    let amount = BALANCES
        .may_load(deps.storage, (&owner, gear.key()))?
        .unwrap_or_default();
    to_json_binary(&BalanceResponse { amount })
}

pub fn query_balances(deps: Deps, owner: String) -> StdResult<Binary> {
    let owner = deps.api.addr_validate(&owner)?;
    let mut amounts = [Uint128::zero(); 3];
    for gear in Gear::ALL {
        amounts[gear.key() as usize] = BALANCES
            .may_load(deps.storage, (&owner, gear.key()))?
            .unwrap_or_default();
    }
    to_json_binary(&BalancesResponse {
        armor: amounts[0],
        shield: amounts[1],
        sword: amounts[2],
    })
}

pub fn query_burn_request(deps: Deps, request_id: u64) -> StdResult<Binary> {
    to_json_binary(&BurnRequestResponse {
        request: REQUESTS.may_load(deps.storage, request_id)?,
    })
}

pub fn query_pending_request(deps: Deps, owner: String, gear: Gear) -> StdResult<Binary> {
    let owner = deps.api.addr_validate(&owner)?;
    to_json_binary(&PendingRequestResponse {
        request_id: PENDING_BURNS.may_load(deps.storage, (&owner, gear.key()))?,
    })
}

pub fn query_roles(deps: Deps, account: String) -> StdResult<Binary> {
    let account = deps.api.addr_validate(&account)?;
    to_json_binary(&RolesResponse {
        minter: MINTERS
            .may_load(deps.storage, &account)?
            .unwrap_or(false),
        pauser: PAUSERS
            .may_load(deps.storage, &account)?
            .unwrap_or(false),
    })
}

pub fn query_oracle_funding(deps: Deps, env: Env) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let balance = deps
        .querier
        .query_balance(&env.contract.address, &config.oracle_fee.denom)?
        .amount;

    to_json_binary(&OracleFundingResponse {
        denom: config.oracle_fee.denom,
        balance,
        fee_per_request: config.oracle_fee.amount,
    })
}

// ─── Dispatch ───────────────────────────────────────────────────────────────

pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Mint {
            recipient,
            gear,
            amount,
        } => execute_mint(deps, env, info, recipient, gear, amount),
        ExecuteMsg::PublicMint { gear, amount } => {
            execute_public_mint(deps, env, info, gear, amount)
        }
        ExecuteMsg::BurnToGainGear { gear, amount } => {
            execute_burn_to_gain_gear(deps, env, info, gear, amount)
        }
        ExecuteMsg::ReceiveRandomness {
            request_id,
            random_word,
        } => execute_receive_randomness(deps, env, info, request_id, random_word),
        ExecuteMsg::SetBurnGearParameters {
            threshold_percent,
            gear_to_burn,
            gear_to_mint,
        } => execute_set_burn_gear_parameters(
            deps,
            env,
            info,
            threshold_percent,
            gear_to_burn,
            gear_to_mint,
        ),
        ExecuteMsg::SetPublicMintParameters { max_supply, rates } => {
            execute_set_public_mint_parameters(deps, env, info, max_supply, rates)
        }
        ExecuteMsg::GrantRole { role, account } => {
            execute_grant_role(deps, env, info, role, account)
        }
        ExecuteMsg::RevokeRole { role, account } => {
            execute_revoke_role(deps, env, info, role, account)
        }
        ExecuteMsg::Pause {} => execute_pause(deps, env, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, env, info),
        ExecuteMsg::FundOracleFees {} => execute_fund_oracle_fees(deps, env, info),
        ExecuteMsg::Withdraw {} => execute_withdraw(deps, env, info),
    }
}

pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query_config(deps),
        QueryMsg::BurnGearParameters {} => query_burn_gear_parameters(deps),
        QueryMsg::PublicMintInfo {} => query_public_mint_info(deps),
        QueryMsg::Balance { owner, gear } => query_balance(deps, owner, gear),
        QueryMsg::Balances { owner } => query_balances(deps, owner),
        QueryMsg::BurnRequest { request_id } => query_burn_request(deps, request_id),
        QueryMsg::PendingRequest { owner, gear } => query_pending_request(deps, owner, gear),
        QueryMsg::Roles { account } => query_roles(deps, account),
        QueryMsg::OracleFunding {} => query_oracle_funding(deps, env),
    }
}

// ─── Migrate ────────────────────────────────────────────────────────────────

pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
