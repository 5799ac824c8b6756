use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, Uint128, Uint256};
use cw_storage_plus::{Item, Map};
use std::fmt;

/// The three gear kinds held in per-owner balances. Storage keys are the
/// stable ids 0/1/2.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum Gear {
    Armor,
    Shield,
    Sword,
}

impl Gear {
    pub const ALL: [Gear; 3] = [Gear::Armor, Gear::Shield, Gear::Sword];

    pub fn key(self) -> u8 {
        match self {
            Gear::Armor => 0,
            Gear::Shield => 1,
            Gear::Sword => 2,
        }
    }
}

impl fmt::Display for Gear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gear::Armor => "armor",
            Gear::Shield => "shield",
            Gear::Sword => "sword",
        };
        f.write_str(name)
    }
}

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Randomness oracle contract; the only address allowed to deliver
    /// `ReceiveRandomness` callbacks
    pub oracle: Addr,
    /// Fee forwarded to the oracle with every randomness request
    pub oracle_fee: Coin,
    /// Native denom public mints are paid in (and `Withdraw` sweeps)
    pub mint_denom: String,
    pub paused: bool,
}

/// Parameters of the burn-for-upgrade mechanic. Requests snapshot
/// `gear_to_mint` and `threshold_percent` at creation, so changing these only
/// affects burns initiated afterwards.
#[cw_serde]
pub struct BurnGearConfig {
    /// Win probability gate in [0,100]; a roll wins iff roll < threshold
    pub threshold_percent: u8,
    pub gear_to_burn: Gear,
    pub gear_to_mint: Gear,
}

#[cw_serde]
pub struct PublicMintConfig {
    /// Total units sellable through the public mint, across all gear kinds
    pub max_supply: Uint128,
    /// Price per unit in `mint_denom`, indexed by gear key
    pub rates: Vec<Uint128>,
}

#[cw_serde]
pub enum RequestStatus {
    Pending,
    Fulfilled,
}

/// One in-flight or settled burn-for-upgrade request. The request id doubles
/// as the oracle job id; the callback echoes it.
#[cw_serde]
pub struct BurnRequest {
    pub requester: Addr,
    pub gear_burned: Gear,
    pub amount_burned: Uint128,
    /// Snapshot of `BurnGearConfig.gear_to_mint` at request time
    pub gear_to_mint: Gear,
    /// Snapshot of `BurnGearConfig.threshold_percent` at request time
    pub threshold_percent: u8,
    pub status: RequestStatus,
    /// Set exactly once, when the oracle callback settles the request
    pub outcome: Option<BurnOutcome>,
}

#[cw_serde]
pub struct BurnOutcome {
    pub random_word: Uint256,
    /// (random_word mod 100) + 1; None for the zero-word forced loss
    pub roll: Option<u8>,
    pub won: bool,
}

#[cw_serde]
pub enum Role {
    Minter,
    Pauser,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const BURN_CONFIG: Item<BurnGearConfig> = Item::new("burn_config");
pub const PUBLIC_MINT: Item<PublicMintConfig> = Item::new("public_mint");

/// Units sold through the public mint so far
pub const MINTED_PUBLICLY: Item<Uint128> = Item::new("minted_publicly");

/// Gear ledger: (owner, gear key) -> balance
pub const BALANCES: Map<(&Addr, u8), Uint128> = Map::new("balances");

/// All burn requests, live and settled, keyed by request id
pub const REQUESTS: Map<u64, BurnRequest> = Map::new("requests");

/// Outstanding requests: (requester, gear key) -> request id. At most one
/// pending request per key; removed when the callback settles it.
pub const PENDING_BURNS: Map<(&Addr, u8), u64> = Map::new("pending_burns");

/// Monotonic request id source; ids are never reused
pub const REQUEST_COUNT: Item<u64> = Item::new("request_count");

pub const MINTERS: Map<&Addr, bool> = Map::new("minters");
pub const PAUSERS: Map<&Addr, bool> = Map::new("pausers");
