use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::FetchError;
use crate::height::BlockHeight;

/// Thin HTTP client for a block explorer serving
/// `<base_url>/<locale>/btc/block/<height>` detail pages.
#[derive(Clone)]
pub struct ExplorerClient {
    base_url: String,
    locale: String,
    http: Client,
}

impl ExplorerClient {
    pub fn new(base_url: String, locale: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            locale,
            http: Client::new(),
        }
    }

    /// Build a client with a request timeout and user agent applied.
    pub fn with_options(
        base_url: String,
        locale: String,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            locale,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Detail page URL for the given height.
    pub fn block_url(&self, height: BlockHeight) -> String {
        format!("{}/{}/btc/block/{}", self.base_url, self.locale, height)
    }

    /// Fetch the raw markup of a block's detail page. One request, no retries.
    pub async fn fetch_block_page(&self, height: BlockHeight) -> Result<String, FetchError> {
        let url = self.block_url(height);
        tracing::info!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| FetchError::Transport {
                url: url.clone(),
                message: err.to_string(),
            })?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::HttpStatus {
                url,
                status: response.status().as_u16(),
            });
        }

        response.text().await.map_err(|err| FetchError::BodyRead {
            url,
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_url_follows_template() {
        let client = ExplorerClient::new(
            "https://www.oklink.com".to_string(),
            "zh-hans".to_string(),
        );
        assert_eq!(
            client.block_url(BlockHeight(840_000)),
            "https://www.oklink.com/zh-hans/btc/block/840000"
        );
    }

    #[test]
    fn trailing_slash_on_base_url_is_ignored() {
        let client = ExplorerClient::new("http://localhost:8080/".to_string(), "en".to_string());
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(
            client.block_url(BlockHeight(1)),
            "http://localhost:8080/en/btc/block/1"
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = ExplorerClient::new("http://127.0.0.1:9".to_string(), "en".to_string());
        let err = client.fetch_block_page(BlockHeight(1)).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
