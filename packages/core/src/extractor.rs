//! Fee extraction from block explorer pages.
//!
//! The explorer embeds block data as inline JSON-like text inside a script
//! blob. Rather than walking the DOM, the extractor looks for the first
//! literal `"fee":<digits>` occurrence in the raw markup, which survives
//! layout changes as long as the data key stays the same.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::FetchError;
use crate::height::BlockHeight;
use crate::services::explorer::ExplorerClient;

const FEE_FIELD_PATTERN: &str = r#""fee":(\d+)"#;

fn fee_field() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(FEE_FIELD_PATTERN).expect("fee field pattern is valid"))
}

/// Locate the first `"fee":<digits>` occurrence in `text` and return the
/// value in satoshis.
pub fn extract_fee(text: &str) -> Result<f64, FetchError> {
    let digits = fee_field()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or(FetchError::FieldNotFound)?
        .as_str();

    // Going through u64 turns an absurdly long digit run into an error
    // instead of an infinite float.
    digits
        .parse::<u64>()
        .map(|sats| sats as f64)
        .map_err(|_| FetchError::NumericParse {
            raw: digits.to_string(),
        })
}

/// Source of per-block fee values. The scraper only depends on this trait.
#[async_trait]
pub trait FeeSource {
    /// Fee paid in the block at `height`, in satoshis.
    async fn fetch_fee(&self, height: BlockHeight) -> Result<f64, FetchError>;

    /// Name of this source for logging.
    fn source_name(&self) -> &str;
}

/// [`FeeSource`] backed by an [`ExplorerClient`].
pub struct ExplorerFeeSource {
    client: ExplorerClient,
}

impl ExplorerFeeSource {
    pub fn new(client: ExplorerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeeSource for ExplorerFeeSource {
    async fn fetch_fee(&self, height: BlockHeight) -> Result<f64, FetchError> {
        let page = self.client.fetch_block_page(height).await?;
        extract_fee(&page)
    }

    fn source_name(&self) -> &str {
        self.client.base_url()
    }
}
