//! # History Module
//!
//! Access to chain history under a provider-imposed block-range ceiling.
//!
//! - [`HistoryScanner::creation_block`] binary-searches bytecode presence to find the
//!   block a contract was deployed in.
//! - [`HistoryScanner::scan`] walks a block range in chunks no wider than
//!   `max_block_range` and returns matching logs oldest first.

/// Creation-block binary search
mod creation_block;
/// Chunked log scanning
pub mod scan;

use alloy::primitives::Address;
use thiserror::Error;

use crate::chain::LaunchpadChain;
use crate::config::ScanConfig;

pub use scan::{plan_chunks, ScanOutcome, ScanStart};

/// Scanner failures.
#[derive(Debug, Error)]
pub enum ScanError {
    /// No bytecode at the latest block
    #[error("no contract code at {address} as of block {block}")]
    NotAContract {
        /// Probed address
        address: Address,
        /// Latest block at the time of the probe
        block: u64,
    },
    /// A query the scan cannot do without failed
    #[error("chain query failed: {0:#}")]
    Chain(eyre::Report),
}

/// Reads chain history through a [`LaunchpadChain`] within [`ScanConfig`] limits.
pub struct HistoryScanner<'a, C: ?Sized> {
    /// Chain access
    chain: &'a C,
    /// Scan limits
    config: ScanConfig,
}

impl<'a, C> HistoryScanner<'a, C>
where
    C: LaunchpadChain + ?Sized,
{
    /// Creates a scanner over `chain`.
    pub const fn new(chain: &'a C, config: ScanConfig) -> Self {
        Self { chain, config }
    }
}
