use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("job {job_id} is already registered for this consumer")]
    JobAlreadyRegistered { job_id: u64 },

    #[error("no job {job_id} registered for consumer {consumer}")]
    UnknownJob { consumer: String, job_id: u64 },
}
