use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint256;

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Called by a consumer contract to register a randomness job. Any
    /// attached fee funds are simply kept, like the real coordinator's
    /// payment would be.
    RequestRandomness { job_id: u64 },

    /// Test-driver entry point standing in for the oracle network: resolves
    /// a registered job by delivering the callback to the consumer. Not
    /// caller-gated, this is a mock.
    FulfillRandomness {
        consumer: String,
        job_id: u64,
        random_word: Uint256,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(JobResponse)]
    Job { consumer: String, job_id: u64 },
}

#[cw_serde]
pub struct JobResponse {
    pub registered: bool,
}

/// Callback delivered into the consumer contract. Mirrors the consumer's
/// `ReceiveRandomness` execute variant over JSON.
#[cw_serde]
pub enum ConsumerExecuteMsg {
    ReceiveRandomness {
        request_id: u64,
        random_word: Uint256,
    },
}
