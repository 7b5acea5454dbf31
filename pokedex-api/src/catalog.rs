//! Cache-first catalog lookups.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use pokedex_cache::ResponseCache;
use pokedex_core::error::Result;
use pokedex_core::traits::CatalogSource;
use pokedex_core::types::{LocationArea, LocationAreaPage, Pokemon};

use crate::client::{ApiConfig, PokeApiClient};
use crate::endpoints::Endpoints;

/// A decoded catalog record and where it came from.
#[derive(Clone, Debug)]
pub struct Fetched<T> {
    /// The decoded record
    pub value: T,
    /// Whether the body was served from the response cache
    pub from_cache: bool,
}

/// Typed catalog backed by a response cache.
///
/// Lookups proceed as:
/// 1. Build the normalized request URL (the cache key)
/// 2. Serve the cached body if present
/// 3. Otherwise fetch from the source, decode, and cache the raw body
///
/// Bodies that fail to decode are returned as errors and never cached.
pub struct Catalog<S = PokeApiClient> {
    source: S,
    cache: Arc<ResponseCache>,
    endpoints: Endpoints,
}

impl Catalog<PokeApiClient> {
    /// Creates a catalog over the live PokeAPI described by `config`.
    pub fn connect(config: &ApiConfig, cache: Arc<ResponseCache>) -> Result<Self> {
        let endpoints = Endpoints::new(&config.base_url)?;
        let source = PokeApiClient::with_config(config)?;
        Ok(Self::new(source, cache, endpoints))
    }
}

impl<S: CatalogSource> Catalog<S> {
    /// Creates a catalog over an arbitrary source.
    pub fn new(source: S, cache: Arc<ResponseCache>, endpoints: Endpoints) -> Self {
        Self {
            source,
            cache,
            endpoints,
        }
    }

    /// URL builder used for cache keys.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The response cache in front of the source.
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Fetches one page of location areas.
    #[instrument(skip(self))]
    pub async fn location_areas(&self, offset: u32, limit: u32) -> Result<Fetched<LocationAreaPage>> {
        let url = self.endpoints.location_areas(offset, limit)?;
        self.fetch_json(&url).await
    }

    /// Fetches a location area by name.
    #[instrument(skip(self))]
    pub async fn location_area(&self, name: &str) -> Result<Fetched<LocationArea>> {
        let url = self.endpoints.location_area(name)?;
        self.fetch_json(&url).await
    }

    /// Fetches a Pokémon by name.
    #[instrument(skip(self))]
    pub async fn pokemon(&self, name: &str) -> Result<Fetched<Pokemon>> {
        let url = self.endpoints.pokemon(name)?;
        self.fetch_json(&url).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &Url) -> Result<Fetched<T>> {
        if let Some(body) = self.cache.get(url.as_str()) {
            debug!(%url, "Cache hit");
            return Ok(Fetched {
                value: serde_json::from_slice(&body)?,
                from_cache: true,
            });
        }

        debug!(%url, "Cache miss, fetching");
        let body = self.source.fetch(url).await?;
        let value = serde_json::from_slice(&body)?;
        self.cache.insert(url.as_str(), body);

        Ok(Fetched {
            value,
            from_cache: false,
        })
    }
}
