//! Trimmed mean calculator

use serde::Serialize;

use crate::stats::error::StatsError;

/// Fraction of samples discarded from each end of the sorted series.
pub const TRIM_FRACTION: f64 = 0.05;

/// Expected average fee per block in BTC, used to normalise the trimmed
/// mean into a percentage.
pub const EXPECTED_AVERAGE_FEE_BTC: f64 = 3.125;

/// Outcome of a trimmed mean calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrimmedMeanReport {
    /// Samples supplied, header row excluded.
    pub samples: usize,
    /// Samples dropped from each end (`ceil(samples * TRIM_FRACTION)`).
    pub trimmed_each_side: usize,
    /// Samples that contributed to the mean.
    pub kept: usize,
    /// Mean of the kept samples, in the samples' own unit.
    pub trimmed_mean: f64,
    /// `trimmed_mean` as a percentage of [`EXPECTED_AVERAGE_FEE_BTC`].
    pub percentage: f64,
}

/// Number of samples trimmed from each end. Rounds up, so even a single
/// sample is trimmed.
pub fn trim_count(samples: usize) -> usize {
    (samples as f64 * TRIM_FRACTION).ceil() as usize
}

/// Trimmed mean of `samples` as a percentage of [`EXPECTED_AVERAGE_FEE_BTC`].
pub fn compute(samples: &[f64]) -> Result<f64, StatsError> {
    summarize(samples).map(|report| report.percentage)
}

/// Same calculation as [`compute`], keeping the intermediate figures.
///
/// The input is left untouched; sorting happens on a local copy.
pub fn summarize(samples: &[f64]) -> Result<TrimmedMeanReport, StatsError> {
    if let Some((index, &value)) = samples.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(StatsError::NonFiniteSample { index, value });
    }

    let n = samples.len();
    let k = trim_count(n);

    if n <= 2 * k {
        return Err(StatsError::InsufficientSamples {
            samples: n,
            trimmed_each_side: k,
        });
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let kept = n - 2 * k;
    let sum: f64 = sorted[k..n - k].iter().sum();
    let trimmed_mean = sum / kept as f64;

    Ok(TrimmedMeanReport {
        samples: n,
        trimmed_each_side: k,
        kept,
        trimmed_mean,
        percentage: trimmed_mean * 100.0 / EXPECTED_AVERAGE_FEE_BTC,
    })
}
