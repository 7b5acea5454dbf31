//! Common traits for the Pokedex client.
//!
//! These traits define the interfaces that different implementations can satisfy,
//! enabling modularity and testing.

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════════
// CATALOG SOURCE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for fetching raw catalog documents.
///
/// Implementations might use:
/// - The public PokeAPI over HTTP (production)
/// - Canned JSON keyed by URL (tests)
///
/// The returned bytes are the undecoded response body; callers decode and
/// cache them keyed by the full request URL.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the document at `url`.
    async fn fetch(&self, url: &Url) -> Result<Bytes>;
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for std::sync::Arc<T> {
    async fn fetch(&self, url: &Url) -> Result<Bytes> {
        (**self).fetch(url).await
    }
}
