use std::collections::BTreeMap;

use serde::Serialize;

use super::pool::PoolState;

/// Metadata emitted once by the launchpad when a token is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Free-form description
    pub description: String,
    /// JSON-encoded social links, kept verbatim
    pub extended: String,
    /// Image location, usually an IPFS gateway URL
    pub image_url: String,
}

impl TokenMetadata {
    /// Decodes `extended` into a map of social links.
    ///
    /// Non-string and empty values are skipped; a malformed `extended` yields an empty map.
    #[must_use]
    pub fn socials(&self) -> BTreeMap<String, String> {
        serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&self.extended)
            .map(|map| {
                map.into_iter()
                    .filter_map(|(key, value)| match value {
                        serde_json::Value::String(link) if !link.is_empty() => Some((key, link)),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Pool state and creation metadata for one token, with human-readable figures.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTokenInfo {
    /// The pool snapshot
    pub pool: PoolState,
    /// The creation metadata
    pub metadata: TokenMetadata,
    /// `last_price` as a decimal RON string
    pub price: String,
    /// `last_mcap_in_eth` as a decimal RON string
    pub market_cap: String,
}
