//! Shared fixtures for the CLI tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use rand::rngs::StdRng;
use rand::SeedableRng;
use url::Url;

use pokedex_api::{Catalog, Endpoints};
use pokedex_cache::ResponseCache;
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::traits::CatalogSource;

use crate::session::Session;

pub const BASE: &str = "http://catalog.test/api/v2/";

/// Canned documents keyed by URL; anything else is a 404.
#[derive(Default)]
pub struct StaticSource {
    documents: HashMap<String, String>,
}

impl StaticSource {
    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.documents.insert(url.to_string(), body.to_string());
        self
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn fetch(&self, url: &Url) -> Result<Bytes> {
        self.documents
            .get(url.as_str())
            .map(|body| Bytes::from(body.clone()))
            .ok_or_else(|| PokedexError::HttpStatus {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// Session over `source` with plain output and a fixed catch seed.
pub fn session(source: StaticSource, page_size: u32) -> Session<StaticSource> {
    colored::control::set_override(false);

    let cache = Arc::new(ResponseCache::new(Duration::from_secs(60)).unwrap());
    let catalog = Catalog::new(source, cache, Endpoints::new(BASE).unwrap());
    Session::new(catalog, page_size).with_rng(StdRng::seed_from_u64(7))
}

pub fn output(out: &[u8]) -> String {
    String::from_utf8_lossy(out).into_owned()
}
