//! In-memory [`FeeSource`] used by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::extractor::FeeSource;
use crate::height::BlockHeight;

/// Serves canned fees per height and records every requested height.
#[derive(Default)]
pub struct MockFeeSource {
    fees: HashMap<u64, f64>,
    missing: HashSet<u64>,
    requested: Mutex<Vec<BlockHeight>>,
}

impl MockFeeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fee(mut self, height: u64, sats: f64) -> Self {
        self.fees.insert(height, sats);
        self
    }

    /// Make `height` fail as if its page lacked a fee field.
    pub fn with_missing(mut self, height: u64) -> Self {
        self.missing.insert(height);
        self
    }

    pub fn requested(&self) -> Vec<BlockHeight> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeeSource for MockFeeSource {
    async fn fetch_fee(&self, height: BlockHeight) -> Result<f64, FetchError> {
        self.requested.lock().unwrap().push(height);

        if self.missing.contains(&height.value()) {
            return Err(FetchError::FieldNotFound);
        }

        self.fees
            .get(&height.value())
            .copied()
            .ok_or_else(|| FetchError::HttpStatus {
                url: format!("mock://block/{}", height),
                status: 404,
            })
    }

    fn source_name(&self) -> &str {
        "mock"
    }
}
