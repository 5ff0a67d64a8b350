//! Trimmed fee statistics
//!
//! Computes the mean of the collected fee samples after discarding the
//! extreme 5% at each end, expressed as a percentage of the expected
//! per-block fee.

pub mod error;
pub mod trimmed;

pub use error::StatsError;
pub use trimmed::{
    compute, summarize, trim_count, TrimmedMeanReport, EXPECTED_AVERAGE_FEE_BTC, TRIM_FRACTION,
};
