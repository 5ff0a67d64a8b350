//! Error types for trimmed statistics

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error(
        "insufficient samples: {samples} sample(s) leave nothing after trimming {trimmed_each_side} from each end"
    )]
    InsufficientSamples {
        samples: usize,
        trimmed_each_side: usize,
    },

    #[error("sample {index} is not a finite number ({value})")]
    NonFiniteSample { index: usize, value: f64 },
}
