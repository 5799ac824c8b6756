use cosmwasm_std::Addr;
use cw_storage_plus::Map;

/// Outstanding randomness jobs keyed by (consumer contract, job id). The
/// value is the registration flag; a job disappears once fulfilled.
pub const JOBS: Map<(&Addr, u64), bool> = Map::new("jobs");
