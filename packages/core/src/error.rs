use thiserror::Error;

use crate::height::HeightError;
use crate::stats::StatsError;
use crate::store::StoreError;

/// Unified application error.
///
/// Everything in here is fatal for a run. Per-block fetch failures are
/// reported through [`FetchError`] and never reach this type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InputValidation(#[from] HeightError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Statistic error: {0}")]
    Statistic(#[from] StatsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code for this error. Validation failures exit with 2 so
    /// scripts can tell them apart from runtime failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InputValidation(_) => 2,
            _ => 1,
        }
    }
}

/// Failure to obtain a fee for a single block.
///
/// The scraper logs these and moves on to the next height.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to read body of {url}: {message}")]
    BodyRead { url: String, message: String },

    #[error("no \"fee\" field found in page")]
    FieldNotFound,

    #[error("fee value {raw:?} is not a valid integer")]
    NumericParse { raw: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::height::BlockHeight;

    #[test]
    fn validation_errors_exit_with_two() {
        let err = AppError::from(HeightError::InvertedRange {
            top: BlockHeight(1),
            bottom: BlockHeight(2),
        });
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn other_errors_exit_with_one() {
        let err = AppError::Config("bad".into());
        assert_eq!(err.exit_code(), 1);

        let err = AppError::from(StatsError::InsufficientSamples {
            samples: 0,
            trimmed_each_side: 0,
        });
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn http_status_message_names_url_and_code() {
        let err = FetchError::HttpStatus {
            url: "https://example.com/block/1".into(),
            status: 503,
        };
        assert_eq!(err.to_string(), "https://example.com/block/1 returned HTTP 503");
    }
}
