//! PokeAPI HTTP client.
//!
//! Issues plain GET requests and hands back the undecoded body. Decoding and
//! caching happen one layer up, in [`crate::Catalog`].

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use pokedex_core::constants::{DEFAULT_API_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PAGE_SIZE};
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::traits::CatalogSource;

/// PokeAPI client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Catalog base URL (e.g. "https://pokeapi.co/api/v2/")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Location areas per page
    pub page_size: u32,
}

impl ApiConfig {
    /// Creates config for the catalog at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Overrides the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Checks the values that cannot be caught by the type system.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(PokedexError::ConfigError("timeout must be at least 1 second".into()));
        }
        if self.page_size == 0 {
            return Err(PokedexError::ConfigError("page size must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// HTTP fetcher for PokeAPI documents.
#[derive(Clone, Debug)]
pub struct PokeApiClient {
    http_client: reqwest::Client,
}

impl PokeApiClient {
    /// Creates a client with the given config.
    pub fn with_config(config: &ApiConfig) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PokedexError::ConfigError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl CatalogSource for PokeApiClient {
    #[instrument(skip(self, url), fields(url = %url))]
    async fn fetch(&self, url: &Url) -> Result<Bytes> {
        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Catalog request failed");
            return Err(PokedexError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(request_error)?;
        debug!(bytes = body.len(), "Fetched catalog document");
        Ok(body)
    }
}

fn request_error(err: reqwest::Error) -> PokedexError {
    if err.is_timeout() {
        PokedexError::Timeout(err.to_string())
    } else {
        PokedexError::HttpError(err.to_string())
    }
}
