use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Coin, Uint128, Uint256};

use crate::state::{Gear, Role};

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    /// Randomness oracle contract allowed to deliver callbacks
    pub oracle: String,
    /// Fee forwarded to the oracle with each randomness request
    pub oracle_fee: Coin,
    /// Denom the public mint is paid in
    pub mint_denom: String,
    /// Price per unit for the public mint, one rate per gear kind
    /// (armor, shield, sword)
    pub mint_rates: Vec<Uint128>,
    /// Total units sellable through the public mint
    pub max_public_supply: Uint128,
    /// Win probability gate in [0,100]
    pub burn_threshold_percent: u8,
    pub gear_to_burn: Gear,
    pub gear_to_mint: Gear,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Free mint, minter role only
    Mint {
        recipient: String,
        gear: Gear,
        amount: Uint128,
    },

    /// Fixed-price public sale. Pay `rate[gear] * amount` in the mint denom.
    PublicMint { gear: Gear, amount: Uint128 },

    /// Burn gear for a chance at the configured upgrade. The burn is
    /// immediate and irreversible; a later losing roll refunds nothing.
    /// Submits a randomness request to the oracle and leaves the request
    /// pending until the callback arrives.
    BurnToGainGear { gear: Gear, amount: Uint128 },

    /// Oracle callback settling a pending burn. Only the configured oracle
    /// address may call this.
    ReceiveRandomness {
        request_id: u64,
        random_word: Uint256,
    },

    /// Update the burn mechanic (admin only). In-flight requests keep the
    /// parameters they were created under.
    SetBurnGearParameters {
        threshold_percent: u8,
        gear_to_burn: Gear,
        gear_to_mint: Gear,
    },

    /// Update public mint capacity and prices (admin only). The sold
    /// counter is preserved.
    SetPublicMintParameters {
        max_supply: Uint128,
        rates: Vec<Uint128>,
    },

    /// Grant a role (admin only)
    GrantRole { role: Role, account: String },
    /// Revoke a role (admin only)
    RevokeRole { role: Role, account: String },

    /// Pause mints and new burns (pauser role). Oracle callbacks keep
    /// working so in-flight requests still settle.
    Pause {},
    /// Unpause (pauser role)
    Unpause {},

    /// Top up the balance used to pay oracle fees
    FundOracleFees {},

    /// Sweep accumulated public mint proceeds to the admin (admin only)
    Withdraw {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},

    #[returns(crate::state::BurnGearConfig)]
    BurnGearParameters {},

    #[returns(PublicMintInfoResponse)]
    PublicMintInfo {},

    #[returns(BalanceResponse)]
    Balance { owner: String, gear: Gear },

    #[returns(BalancesResponse)]
    Balances { owner: String },

    #[returns(BurnRequestResponse)]
    BurnRequest { request_id: u64 },

    #[returns(PendingRequestResponse)]
    PendingRequest { owner: String, gear: Gear },

    #[returns(RolesResponse)]
    Roles { account: String },

    #[returns(OracleFundingResponse)]
    OracleFunding {},
}

#[cw_serde]
pub struct PublicMintInfoResponse {
    pub max_supply: Uint128,
    pub minted: Uint128,
    pub remaining: Uint128,
    pub rates: Vec<Uint128>,
    pub denom: String,
}

#[cw_serde]
pub struct BalanceResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct BalancesResponse {
    pub armor: Uint128,
    pub shield: Uint128,
    pub sword: Uint128,
}

#[cw_serde]
pub struct BurnRequestResponse {
    pub request: Option<crate::state::BurnRequest>,
}

#[cw_serde]
pub struct PendingRequestResponse {
    pub request_id: Option<u64>,
}

#[cw_serde]
pub struct RolesResponse {
    pub minter: bool,
    pub pauser: bool,
}

#[cw_serde]
pub struct OracleFundingResponse {
    pub denom: String,
    pub balance: Uint128,
    pub fee_per_request: Uint128,
}

#[cw_serde]
pub struct MigrateMsg {}

/// Message accepted by the randomness oracle contract. The job id is chosen
/// by this contract and echoed back in the callback for correlation.
#[cw_serde]
pub enum OracleExecuteMsg {
    RequestRandomness { job_id: u64 },
}
