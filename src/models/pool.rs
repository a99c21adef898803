use alloy::primitives::{Address, U256};
use serde::Serialize;

/// A bonding-curve pool as returned by the launchpad's `getPool`.
///
/// Reserve, price and constant fields are fixed-point integers scaled by 1e18.
/// A `PoolState` is a snapshot: it is read fresh on every call and never cached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolState {
    /// The token traded on this curve
    pub token: Address,
    /// Real token balance held by the pool
    pub token_reserve: U256,
    /// Virtual token reserve used for pricing
    pub virtual_token_reserve: U256,
    /// Real RON balance held by the pool
    pub eth_reserve: U256,
    /// Virtual RON reserve used for pricing
    pub virtual_eth_reserve: U256,
    /// Price recorded by the contract on the last trade
    pub last_price: U256,
    /// Market cap in RON recorded by the contract on the last trade
    pub last_mcap_in_eth: U256,
    /// Timestamp of the last trade
    pub last_timestamp: U256,
    /// Block of the last trade
    pub last_block: U256,
    /// Account that launched the token
    pub creator: Address,
    /// Contract that receives liquidity on graduation
    pub liquidity_manager: Address,
    /// Sequential pool identifier
    pub pool_id: U256,
    /// `virtual_token_reserve * virtual_eth_reserve` at launch
    pub curve_constant: U256,
}

impl PoolState {
    /// Whether the pool slot is unset, i.e. the launchpad has never seen this token.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token == Address::ZERO && self.curve_constant.is_zero()
    }
}
