//! Block range scraper.
//!
//! Walks a height range from top to bottom, fetching one fee per block and
//! appending it to the fee table before moving on. Fetch failures for a
//! single block are logged and leave a gap in the table; only storage
//! failures stop the run.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::extractor::FeeSource;
use crate::height::{BlockHeight, HeightRange};
use crate::store::{FeeRecord, FeeTableWriter, StoreError};

/// A block whose fee could not be obtained.
#[derive(Debug, Clone, Serialize)]
pub struct BlockFailure {
    pub height: u64,
    pub error: String,
}

/// Outcome of a scrape run.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeSummary {
    pub top: u64,
    pub bottom: u64,
    pub attempted: u64,
    pub written: usize,
    pub failures: Vec<BlockFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Scrape every height in `range`, newest first.
///
/// Sleeps for `delay` between consecutive requests when it is non-zero.
pub async fn run_scrape(
    source: &(dyn FeeSource + Send + Sync),
    range: HeightRange,
    writer: &mut FeeTableWriter,
    delay: Duration,
) -> Result<ScrapeSummary, StoreError> {
    let started_at = Utc::now();
    let mut attempted = 0u64;
    let mut failures = Vec::new();

    tracing::info!(
        "Scraping {} block(s) from {} down to {} via {}",
        range.len(),
        range.top(),
        range.bottom(),
        source.source_name()
    );

    for height in range.descending() {
        if attempted > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        attempted += 1;

        if let Some(failure) = scrape_one(source, height, writer).await? {
            failures.push(failure);
        }
    }

    let summary = ScrapeSummary {
        top: range.top().value(),
        bottom: range.bottom().value(),
        attempted,
        written: writer.rows_written(),
        failures,
        started_at,
        finished_at: Utc::now(),
    };

    tracing::info!(
        "Scrape finished: {} attempted, {} written, {} failed",
        summary.attempted,
        summary.written,
        summary.failures.len()
    );

    Ok(summary)
}

/// Fetch and persist a single block. Extracted for testability.
async fn scrape_one(
    source: &(dyn FeeSource + Send + Sync),
    height: BlockHeight,
    writer: &mut FeeTableWriter,
) -> Result<Option<BlockFailure>, StoreError> {
    let fee_sats = match source.fetch_fee(height).await {
        Ok(fee) => fee,
        Err(err) => {
            tracing::warn!("Could not get fee for block {}: {}", height, err);
            return Ok(Some(BlockFailure {
                height: height.value(),
                error: err.to_string(),
            }));
        }
    };

    let record = FeeRecord::new(height, fee_sats);
    writer.append(&record)?;
    tracing::debug!("Block {} fee {:.8} BTC", height, record.fee_btc());

    Ok(None)
}
