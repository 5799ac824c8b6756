use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Uint256, WasmMsg,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::*;
use crate::state::JOBS;

const CONTRACT_NAME: &str = "crates.io:gear-randomness-mock";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME))
}

pub fn execute_request_randomness(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    job_id: u64,
) -> Result<Response, ContractError> {
    if JOBS.has(deps.storage, (&info.sender, job_id)) {
        return Err(ContractError::JobAlreadyRegistered { job_id });
    }
    JOBS.save(deps.storage, (&info.sender, job_id), &true)?;

    Ok(Response::new()
        .add_attribute("action", "request_randomness")
        .add_attribute("consumer", info.sender.as_str())
        .add_attribute("job_id", job_id.to_string()))
}

pub fn execute_fulfill_randomness(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    consumer: String,
    job_id: u64,
    random_word: Uint256,
) -> Result<Response, ContractError> {
    let consumer = deps.api.addr_validate(&consumer)?;

    if !JOBS.has(deps.storage, (&consumer, job_id)) {
        return Err(ContractError::UnknownJob {
            consumer: consumer.into_string(),
            job_id,
        });
    }
    JOBS.remove(deps.storage, (&consumer, job_id));

    let callback = WasmMsg::Execute {
        contract_addr: consumer.to_string(),
        msg: to_json_binary(&ConsumerExecuteMsg::ReceiveRandomness {
            request_id: job_id,
            random_word,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(callback)
        .add_attribute("action", "fulfill_randomness")
        .add_attribute("consumer", consumer.as_str())
        .add_attribute("job_id", job_id.to_string())
        .add_attribute("random_word", random_word.to_string()))
}

pub fn query_job(deps: Deps, consumer: String, job_id: u64) -> StdResult<Binary> {
    let consumer = deps.api.addr_validate(&consumer)?;
    to_json_binary(&JobResponse {
        registered: JOBS.has(deps.storage, (&consumer, job_id)),
    })
}

pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RequestRandomness { job_id } => {
            execute_request_randomness(deps, env, info, job_id)
        }
        ExecuteMsg::FulfillRandomness {
            consumer,
            job_id,
            random_word,
        } => execute_fulfill_randomness(deps, env, info, consumer, job_id, random_word),
    }
}

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Job { consumer, job_id } => query_job(deps, consumer, job_id),
    }
}
