use alloy::primitives::{Address, TxHash, U256};
use serde::{Deserialize, Serialize};

/// Caller-supplied fields for a new token launch.
///
/// Only `init_amount_in` is interpreted client-side; everything else is passed to the
/// contract as-is and validated there.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchParameters {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Initial buy-in as a decimal RON string, e.g. `"0.5"`
    pub init_amount_in: String,
    /// Free-form description
    pub description: String,
    /// JSON-encoded social links
    pub extended: String,
    /// Image URL
    pub image_url: String,
}

/// Payment breakdown for a launch, computed from the live creation fee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchQuote {
    /// Creation fee read from the contract, in wei
    pub creation_fee: U256,
    /// Initial buy-in, in wei
    pub init_amount: U256,
    /// Value attached to the transaction
    pub total_value: U256,
}

/// Outcome of a mined launch transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchResult {
    /// Hash of the launch transaction
    pub transaction_hash: TxHash,
    /// The new token, when the receipt carried a creation log
    pub token_address: Option<Address>,
}
