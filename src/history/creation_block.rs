use alloy::primitives::Address;
use log::{debug, info, warn};

use super::{HistoryScanner, ScanError};
use crate::chain::LaunchpadChain;

impl<C> HistoryScanner<'_, C>
where
    C: LaunchpadChain + ?Sized,
{
    /// Finds the first block at which `address` has bytecode.
    ///
    /// Binary search over `0..=latest`, keeping the lowest block seen with code.
    /// A probe that keeps failing after `probe_retries` retries counts as "no code",
    /// which moves the search towards newer blocks. A flaky node near the true creation
    /// block can therefore bias the answer slightly late, never early.
    ///
    /// The result is best effort for addresses whose code changes over time
    /// (self-destruct and redeploy), since presence is then not monotonic.
    ///
    /// # Errors
    /// * [`ScanError::NotAContract`] if there is no code at the latest block
    /// * [`ScanError::Chain`] if the latest block or its bytecode cannot be read
    pub async fn creation_block(&self, address: Address) -> Result<u64, ScanError> {
        let latest = self.chain.block_number().await.map_err(ScanError::Chain)?;

        let code = self
            .chain
            .code_at(address, latest)
            .await
            .map_err(ScanError::Chain)?;
        if code.is_empty() {
            return Err(ScanError::NotAContract {
                address,
                block: latest,
            });
        }

        let mut low = 0_u64;
        let mut high = latest;
        let mut found = latest;
        let mut probes = 0_u32;

        while low <= high {
            let mid = low + (high - low) / 2;
            probes += 1;

            if self.has_code_at(address, mid).await {
                found = mid;
                match mid.checked_sub(1) {
                    Some(below) => high = below,
                    None => break,
                }
            } else {
                low = mid + 1;
            }
        }

        info!(
            "history::creation_block: {address} created at block {found} ({probes} probes, latest {latest})"
        );
        Ok(found)
    }

    /// One bytecode probe with bounded retries. Exhausted retries read as "no code".
    async fn has_code_at(&self, address: Address, block: u64) -> bool {
        for attempt in 0..=self.config.probe_retries {
            match self.chain.code_at(address, block).await {
                Ok(code) => {
                    debug!(
                        "history::creation_block: block {block}: {} bytes",
                        code.len()
                    );
                    return !code.is_empty();
                }
                Err(e) => {
                    warn!(
                        "history::creation_block: probe at block {block} failed (attempt {}): {e}",
                        attempt + 1
                    );
                }
            }
        }
        warn!("history::creation_block: treating block {block} as having no code");
        false
    }
}
