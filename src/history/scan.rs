use futures::{stream, StreamExt, TryStreamExt};
use log::{debug, info};

use super::{HistoryScanner, ScanError};
use crate::chain::{ChainLog, EventFilter, LaunchpadChain};

/// Where a scan starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanStart {
    /// Only the newest `max_block_range` blocks
    Recent,
    /// From the given block up to the latest one
    From(u64),
}

/// Logs found by a scan together with the range that was covered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Matching logs, oldest first
    pub logs: Vec<ChainLog>,
    /// First block scanned
    pub from_block: u64,
    /// Last block scanned
    pub to_block: u64,
    /// How the start was chosen
    pub start: ScanStart,
}

impl ScanOutcome {
    /// True when nothing matched and only the recent window was searched, meaning an
    /// earlier start block might still find a match.
    #[must_use]
    pub fn missed_recent_window(&self) -> bool {
        self.logs.is_empty() && self.start == ScanStart::Recent
    }

    /// True when the requested start lies beyond the chain head, so nothing was scanned.
    #[must_use]
    pub const fn start_past_head(&self) -> bool {
        self.from_block > self.to_block
    }
}

/// Splits the inclusive range `from..=to` into consecutive inclusive chunks, each
/// spanning at most `max_block_range` blocks, oldest first.
///
/// An empty range (`from > to`) yields no chunks. A `max_block_range` of zero is
/// treated as one.
#[must_use]
pub fn plan_chunks(from: u64, to: u64, max_block_range: u64) -> Vec<(u64, u64)> {
    let span = max_block_range.max(1);
    let mut chunks = Vec::new();
    let mut start = from;

    while start <= to {
        let end = start.saturating_add(span - 1).min(to);
        chunks.push((start, end));
        match end.checked_add(1) {
            Some(next) => start = next,
            None => break,
        }
    }

    chunks
}

impl<C> HistoryScanner<'_, C>
where
    C: LaunchpadChain + ?Sized,
{
    /// Scans from `start` up to the latest block for logs matching `filter`.
    ///
    /// With [`ScanStart::Recent`] only the newest `max_block_range` blocks are covered;
    /// check [`ScanOutcome::missed_recent_window`] before concluding there is no match.
    /// Full-history scans are opt-in through [`ScanStart::From`].
    ///
    /// # Errors
    /// * [`ScanError::Chain`] if the latest block or any chunk query fails
    pub async fn scan(
        &self,
        filter: &EventFilter,
        start: ScanStart,
    ) -> Result<ScanOutcome, ScanError> {
        let latest = self.chain.block_number().await.map_err(ScanError::Chain)?;
        let from_block = match start {
            ScanStart::Recent => latest.saturating_sub(self.config.max_block_range.max(1) - 1),
            ScanStart::From(block) => block,
        };

        let logs = self.scan_range(filter, from_block, latest).await?;
        Ok(ScanOutcome {
            logs,
            from_block,
            to_block: latest,
            start,
        })
    }

    /// Collects logs matching `filter` in `from..=to`, querying in chunks.
    ///
    /// Chunks may be in flight concurrently (up to `concurrency`), but results are
    /// concatenated in chunk order, so the output is ascending by block. Any chunk
    /// failure fails the whole scan.
    ///
    /// # Errors
    /// * [`ScanError::Chain`] if any chunk query fails
    pub async fn scan_range(
        &self,
        filter: &EventFilter,
        from: u64,
        to: u64,
    ) -> Result<Vec<ChainLog>, ScanError> {
        let chunks = plan_chunks(from, to, self.config.max_block_range);
        info!(
            "history::scan: {}..={} in {} chunks of up to {} blocks",
            from,
            to,
            chunks.len(),
            self.config.max_block_range
        );

        let chunk_logs: Vec<Vec<ChainLog>> = stream::iter(chunks)
            .map(|(chunk_from, chunk_to)| async move {
                let logs = self.chain.logs(filter, chunk_from, chunk_to).await?;
                debug!(
                    "history::scan: chunk {chunk_from}..={chunk_to}: {} logs",
                    logs.len()
                );
                Ok::<_, eyre::Report>(logs)
            })
            .buffered(self.config.concurrency.max(1))
            .try_collect()
            .await
            .map_err(ScanError::Chain)?;

        Ok(chunk_logs
            .into_iter()
            .flatten()
            .filter(|log| (from..=to).contains(&log.block_number))
            .collect())
    }
}
