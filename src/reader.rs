//! # Pool & metadata reader
//!
//! Read-side API of the launchpad: the live pool struct, the token's creation metadata
//! recovered from `TokenCreated` logs, and both combined. Every failure leaves this
//! module as a [`ClassifiedError`].

use alloy::primitives::Address;
use alloy::sol_types::SolEvent;
use log::{info, warn};

use crate::chain::contract::IPumpFactory::TokenCreated;
use crate::chain::{ChainLog, EventFilter, LaunchpadChain};
use crate::config::{Config, ScanConfig};
use crate::curve::format_wad;
use crate::error::{ClassifiedError, ErrorKind};
use crate::history::{HistoryScanner, ScanError, ScanStart};
use crate::models::{CompleteTokenInfo, PoolState, TokenMetadata};

/// Reads token state from one launchpad deployment.
pub struct TokenReader<'a, C: ?Sized> {
    /// Chain access
    chain: &'a C,
    /// Launchpad contract
    contract: Address,
    /// History scanning limits
    scan: ScanConfig,
}

impl<'a, C> TokenReader<'a, C>
where
    C: LaunchpadChain + ?Sized,
{
    /// Creates a reader for the launchpad at `contract`.
    pub const fn new(chain: &'a C, contract: Address, scan: ScanConfig) -> Self {
        Self {
            chain,
            contract,
            scan,
        }
    }

    /// Creates a reader from the application config.
    pub const fn from_config(chain: &'a C, config: &Config) -> Self {
        Self::new(chain, config.contract, config.scan)
    }

    /// The launchpad's pool for `token`, read fresh.
    ///
    /// # Errors
    /// * Classified provider or contract error if the read fails
    pub async fn get_pool_state(&self, token: Address) -> Result<PoolState, ClassifiedError> {
        let pool = self
            .chain
            .pool(self.contract, token)
            .await
            .map_err(|e| ClassifiedError::from_chain(&e).during("reading pool"))?;

        if pool.is_empty() {
            warn!("reader::get_pool_state: launchpad has no pool for {token}");
        }
        Ok(pool)
    }

    /// Creation metadata of `token`.
    ///
    /// Without `from_block` only the newest `max_block_range` blocks are scanned; pass an
    /// earlier start (e.g. from [`Self::find_creation_block`]) for older tokens. When
    /// several creation events match, the most recently mined one wins.
    ///
    /// # Errors
    /// * [`ErrorKind::MetadataNotFound`] if no creation event is in range
    /// * [`ErrorKind::ContractError`] if the event cannot be decoded
    /// * Classified provider error if a log query fails
    pub async fn get_token_metadata(
        &self,
        token: Address,
        from_block: Option<u64>,
    ) -> Result<TokenMetadata, ClassifiedError> {
        let filter = EventFilter {
            address: self.contract,
            signature: TokenCreated::SIGNATURE_HASH,
            topic1: Some(token.into_word()),
        };
        let start = from_block.map_or(ScanStart::Recent, ScanStart::From);

        let outcome = HistoryScanner::new(self.chain, self.scan)
            .scan(&filter, start)
            .await
            .map_err(|e| scan_error(e, "scanning creation events"))?;

        let Some(log) = outcome.logs.last() else {
            let message = if outcome.start_past_head() {
                format!(
                    "No creation event for {token}: start block {} is past the chain head {}",
                    outcome.from_block, outcome.to_block
                )
            } else if outcome.missed_recent_window() {
                format!(
                    "No creation event for {token} in the latest {} blocks ({}..={}); \
                     supply an earlier start block",
                    self.scan.max_block_range, outcome.from_block, outcome.to_block
                )
            } else {
                format!(
                    "No creation event for {token} in blocks {}..={}",
                    outcome.from_block, outcome.to_block
                )
            };
            return Err(ClassifiedError::new(
                ErrorKind::MetadataNotFound,
                message,
                format!("0 TokenCreated logs for {token}"),
            ));
        };

        if outcome.logs.len() > 1 {
            warn!(
                "reader::get_token_metadata: {} creation events for {token}, using block {}",
                outcome.logs.len(),
                log.block_number
            );
        }

        decode_metadata(log)
    }

    /// Pool state and metadata of `token`, read concurrently.
    ///
    /// Price and market cap are the contract's own `last_price` and `last_mcap_in_eth`,
    /// formatted as decimal RON.
    ///
    /// # Errors
    /// * Any error from [`Self::get_pool_state`] or [`Self::get_token_metadata`]
    pub async fn get_complete_token_info(
        &self,
        token: Address,
        from_block: Option<u64>,
    ) -> Result<CompleteTokenInfo, ClassifiedError> {
        let (pool, metadata) = tokio::try_join!(
            self.get_pool_state(token),
            self.get_token_metadata(token, from_block)
        )?;

        info!(
            "reader::get_complete_token_info: {} ({}) pool #{}",
            metadata.name, metadata.symbol, pool.pool_id
        );

        Ok(CompleteTokenInfo {
            price: format_wad(pool.last_price),
            market_cap: format_wad(pool.last_mcap_in_eth),
            pool,
            metadata,
        })
    }

    /// Block in which `token` was deployed, usable as `from_block` for metadata lookups.
    ///
    /// # Errors
    /// * [`ErrorKind::NotAContract`] if `token` has no code
    /// * Classified provider error if the latest block cannot be read
    pub async fn find_creation_block(&self, token: Address) -> Result<u64, ClassifiedError> {
        HistoryScanner::new(self.chain, self.scan)
            .creation_block(token)
            .await
            .map_err(|e| scan_error(e, "locating creation block"))
    }
}

/// Decodes a `TokenCreated` log into metadata.
fn decode_metadata(log: &ChainLog) -> Result<TokenMetadata, ClassifiedError> {
    TokenCreated::decode_raw_log(log.topics.iter().copied(), &log.data, true)
        .map(TokenMetadata::from)
        .map_err(|e| {
            ClassifiedError::new(
                ErrorKind::ContractError,
                format!("Malformed creation event in block {}", log.block_number),
                e.to_string(),
            )
        })
}

/// Classifies a scanner failure.
fn scan_error(error: ScanError, action: &str) -> ClassifiedError {
    match error {
        ScanError::NotAContract { .. } => ClassifiedError::new(
            ErrorKind::NotAContract,
            ErrorKind::NotAContract.human_message(),
            error.to_string(),
        ),
        ScanError::Chain(report) => ClassifiedError::from_chain(&report).during(action),
    }
}
