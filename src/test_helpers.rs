#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use alloy::sol_types::SolEvent;
use async_trait::async_trait;
use eyre::{eyre, Result};

use crate::chain::contract::IPumpFactory;
use crate::chain::{ChainLog, EventFilter, LaunchReceipt, LaunchpadChain};
use crate::models::{LaunchParameters, PoolState};

/// Deterministic address from a number.
pub fn address(n: u64) -> Address {
    Address::left_padding_from(&n.to_be_bytes())
}

/// Pool with the given virtual reserves and curve constant, everything else zeroed.
pub fn pool_with_reserves(
    virtual_token_reserve: U256,
    virtual_eth_reserve: U256,
    curve_constant: U256,
) -> PoolState {
    PoolState {
        token: address(0xA11CE),
        token_reserve: virtual_token_reserve,
        virtual_token_reserve,
        eth_reserve: U256::ZERO,
        virtual_eth_reserve,
        last_price: U256::ZERO,
        last_mcap_in_eth: U256::ZERO,
        last_timestamp: U256::ZERO,
        last_block: U256::ZERO,
        creator: address(0xC0FFEE),
        liquidity_manager: address(0x11),
        pool_id: U256::from(1),
        curve_constant,
    }
}

/// A `TokenCreated` log from `contract` for `token`, mined at `block`.
pub fn creation_log(contract: Address, token: Address, block: u64, name: &str) -> ChainLog {
    let event = IPumpFactory::TokenCreated {
        token,
        creator: address(0xC0FFEE),
        name: name.to_string(),
        symbol: name.to_uppercase(),
        description: format!("{name} description"),
        extended: r#"{"website":"https://example.org"}"#.to_string(),
        imageUrl: format!("ipfs://{name}"),
        timestamp: U256::from(block),
    };
    let data = event.encode_log_data();
    ChainLog {
        address: contract,
        topics: data.topics().to_vec(),
        data: data.data,
        block_number: block,
    }
}

/// A receipt log with arbitrary topics.
pub fn receipt_log(address: Address, topics: Vec<B256>) -> ChainLog {
    ChainLog {
        address,
        topics,
        data: Bytes::new(),
        block_number: 1,
    }
}

/// In-memory [`LaunchpadChain`] that records what it was asked.
#[derive(Default)]
pub struct FakeChain {
    /// Latest block
    latest: u64,
    /// Block from which each contract has code
    code_from: HashMap<Address, u64>,
    /// Remaining forced failures per probed block
    probe_failures: Mutex<HashMap<u64, u32>>,
    /// Number of bytecode probes served
    code_probes: Mutex<usize>,
    /// Logs, kept sorted by block
    logs: Vec<ChainLog>,
    /// Chunk start that always fails
    failing_log_chunk: Option<u64>,
    /// Every `(from, to)` log query served
    log_queries: Mutex<Vec<(u64, u64)>>,
    /// Pools by token
    pools: HashMap<Address, PoolState>,
    /// Error returned by every pool read
    pool_error: Option<String>,
    /// Creation fee
    creation_fee: U256,
    /// Error returned on submit
    submit_error: Option<String>,
    /// Error returned while awaiting the receipt
    receipt_error: Option<String>,
    /// Receipt returned for any hash
    receipt: Option<LaunchReceipt>,
    /// Submitted launches with attached value
    submissions: Mutex<Vec<(LaunchParameters, U256)>>,
}

impl FakeChain {
    pub fn new(latest: u64) -> Self {
        Self {
            latest,
            ..Self::default()
        }
    }

    pub fn with_contract(mut self, address: Address, created_at: u64) -> Self {
        self.code_from.insert(address, created_at);
        self
    }

    pub fn with_probe_failures(self, block: u64, failures: u32) -> Self {
        self.probe_failures
            .lock()
            .unwrap()
            .insert(block, failures);
        self
    }

    pub fn with_log(mut self, log: ChainLog) -> Self {
        self.logs.push(log);
        self.logs.sort_by_key(|log| log.block_number);
        self
    }

    pub fn with_failing_log_chunk(mut self, chunk_start: u64) -> Self {
        self.failing_log_chunk = Some(chunk_start);
        self
    }

    pub fn with_pool(mut self, pool: PoolState) -> Self {
        self.pools.insert(pool.token, pool);
        self
    }

    pub fn with_pool_error(mut self, message: &str) -> Self {
        self.pool_error = Some(message.to_string());
        self
    }

    pub fn with_creation_fee(mut self, fee: U256) -> Self {
        self.creation_fee = fee;
        self
    }

    pub fn with_submit_error(mut self, message: &str) -> Self {
        self.submit_error = Some(message.to_string());
        self
    }

    pub fn with_receipt_error(mut self, message: &str) -> Self {
        self.receipt_error = Some(message.to_string());
        self
    }

    pub fn with_receipt(mut self, receipt: LaunchReceipt) -> Self {
        self.receipt = Some(receipt);
        self
    }

    pub fn code_probes(&self) -> usize {
        *self.code_probes.lock().unwrap()
    }

    pub fn take_log_queries(&self) -> Vec<(u64, u64)> {
        std::mem::take(&mut *self.log_queries.lock().unwrap())
    }

    pub fn submissions(&self) -> Vec<(LaunchParameters, U256)> {
        self.submissions.lock().unwrap().clone()
    }

    /// One unchunked pass over the stored logs.
    pub fn logs_between(&self, filter: &EventFilter, from: u64, to: u64) -> Vec<ChainLog> {
        self.logs
            .iter()
            .filter(|log| filter.matches(log) && (from..=to).contains(&log.block_number))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl LaunchpadChain for FakeChain {
    async fn block_number(&self) -> Result<u64> {
        Ok(self.latest)
    }

    async fn code_at(&self, address: Address, block: u64) -> Result<Bytes> {
        *self.code_probes.lock().unwrap() += 1;

        if let Some(remaining) = self.probe_failures.lock().unwrap().get_mut(&block) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(eyre!("connection reset while probing block {block}"));
            }
        }

        match self.code_from.get(&address) {
            Some(created_at) if block >= *created_at => Ok(Bytes::from_static(&[0x60, 0x80])),
            _ => Ok(Bytes::new()),
        }
    }

    async fn logs(
        &self,
        filter: &EventFilter,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<ChainLog>> {
        self.log_queries.lock().unwrap().push((from_block, to_block));
        if self.failing_log_chunk == Some(from_block) {
            return Err(eyre!("query returned more than 10000 results"));
        }
        Ok(self.logs_between(filter, from_block, to_block))
    }

    async fn pool(&self, _contract: Address, token: Address) -> Result<PoolState> {
        if let Some(message) = &self.pool_error {
            return Err(eyre!("{message}"));
        }
        self.pools
            .get(&token)
            .cloned()
            .ok_or_else(|| eyre!("execution reverted: unknown pool"))
    }

    async fn creation_fee(&self, _contract: Address) -> Result<U256> {
        Ok(self.creation_fee)
    }

    async fn submit_launch(
        &self,
        _contract: Address,
        params: &LaunchParameters,
        value: U256,
    ) -> Result<TxHash> {
        if let Some(message) = &self.submit_error {
            return Err(eyre!("{message}"));
        }
        self.submissions
            .lock()
            .unwrap()
            .push((params.clone(), value));
        Ok(TxHash::with_last_byte(0x42))
    }

    async fn await_receipt(&self, tx_hash: TxHash) -> Result<LaunchReceipt> {
        if let Some(message) = &self.receipt_error {
            return Err(eyre!("{message}"));
        }
        Ok(self.receipt.clone().unwrap_or(LaunchReceipt {
            transaction_hash: tx_hash,
            success: true,
            logs: Vec::new(),
        }))
    }
}
