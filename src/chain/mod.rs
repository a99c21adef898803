//! # Chain capability
//!
//! Everything the launchpad client needs from a node, behind one trait.
//! The reader, the history scanner and the launch orchestrator only ever talk to
//! [`LaunchpadChain`], so they can be driven by a live alloy provider or by an
//! in-memory fake in tests.

/// Solidity bindings for the launchpad contract
pub mod contract;
/// `LaunchpadChain` over an alloy provider
pub mod provider;

use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use async_trait::async_trait;
use eyre::Result;

use crate::models::{LaunchParameters, PoolState};

pub use provider::AlloyChain;

/// A log entry as returned by `eth_getLogs` or found in a receipt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainLog {
    /// Emitting contract
    pub address: Address,
    /// Indexed topics, signature first
    pub topics: Vec<B256>,
    /// Non-indexed payload
    pub data: Bytes,
    /// Block the log was mined in
    pub block_number: u64,
}

/// Log filter for one event signature on one contract, optionally narrowed by the first
/// indexed argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventFilter {
    /// Emitting contract
    pub address: Address,
    /// Event signature hash (topic 0)
    pub signature: B256,
    /// Required value of topic 1
    pub topic1: Option<B256>,
}

impl EventFilter {
    /// Whether `log` satisfies this filter, ignoring the block range.
    #[must_use]
    pub fn matches(&self, log: &ChainLog) -> bool {
        log.address == self.address
            && log.topics.first() == Some(&self.signature)
            && self
                .topic1
                .is_none_or(|topic| log.topics.get(1) == Some(&topic))
    }
}

/// A mined transaction receipt, reduced to what address extraction needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchReceipt {
    /// Hash of the mined transaction
    pub transaction_hash: TxHash,
    /// Whether execution succeeded
    pub success: bool,
    /// Logs in emission order
    pub logs: Vec<ChainLog>,
}

/// Remote chain access used by the launchpad client.
///
/// Implementations must be reentrant: every method call is an independent request and
/// no state is shared between calls. Errors are raw transport or contract failures and
/// get classified by the caller.
#[async_trait]
pub trait LaunchpadChain: Send + Sync {
    /// Latest block number.
    async fn block_number(&self) -> Result<u64>;

    /// Deployed bytecode of `address` as of `block`, empty if there is none.
    async fn code_at(&self, address: Address, block: u64) -> Result<Bytes>;

    /// Logs matching `filter` in the inclusive range `from_block..=to_block`,
    /// ordered by block.
    async fn logs(&self, filter: &EventFilter, from_block: u64, to_block: u64)
        -> Result<Vec<ChainLog>>;

    /// The pool struct the launchpad at `contract` keeps for `token`.
    async fn pool(&self, contract: Address, token: Address) -> Result<PoolState>;

    /// Current creation fee of the launchpad, in wei.
    async fn creation_fee(&self, contract: Address) -> Result<U256>;

    /// Sends `createToken` with `value` attached and returns the pending transaction hash.
    async fn submit_launch(
        &self,
        contract: Address,
        params: &LaunchParameters,
        value: U256,
    ) -> Result<TxHash>;

    /// Waits until `tx_hash` is mined and returns its receipt.
    async fn await_receipt(&self, tx_hash: TxHash) -> Result<LaunchReceipt>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_signature_and_topic1() {
        let contract = Address::with_last_byte(1);
        let token = Address::with_last_byte(2);
        let signature = B256::with_last_byte(9);
        let filter = EventFilter {
            address: contract,
            signature,
            topic1: Some(token.into_word()),
        };

        let log = |address: Address, topics: Vec<B256>| ChainLog {
            address,
            topics,
            data: Bytes::new(),
            block_number: 1,
        };

        assert!(filter.matches(&log(contract, vec![signature, token.into_word()])));
        assert!(!filter.matches(&log(contract, vec![signature])));
        assert!(!filter.matches(&log(contract, vec![B256::ZERO, token.into_word()])));
        assert!(!filter.matches(&log(token, vec![signature, token.into_word()])));
        assert!(!filter.matches(&log(
            contract,
            vec![signature, Address::with_last_byte(3).into_word()]
        )));

        let any_token = EventFilter {
            topic1: None,
            ..filter
        };
        assert!(any_token.matches(&log(contract, vec![signature])));
    }
}
