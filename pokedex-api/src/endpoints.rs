//! Request URL construction.
//!
//! Every URL produced here is fully normalized (trailing slashes, lower-cased
//! names, explicit `offset`/`limit`) because the response cache is keyed by
//! the URL string: two requests for the same document must build the same key.

use url::Url;

use pokedex_core::constants::{LOCATION_AREA_PATH, POKEMON_PATH};
use pokedex_core::error::{PokedexError, Result};

/// URL builder rooted at the catalog base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Creates endpoints rooted at `base_url`. A missing trailing slash is added.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            base: Url::parse(&base)?,
        })
    }

    /// Base URL of the catalog.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// One page of the location-area list.
    pub fn location_areas(&self, offset: u32, limit: u32) -> Result<Url> {
        let mut url = self.base.join(LOCATION_AREA_PATH)?;
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    /// Detail of a single location area.
    pub fn location_area(&self, name: &str) -> Result<Url> {
        self.detail(LOCATION_AREA_PATH, name)
    }

    /// Detail of a single Pokémon.
    pub fn pokemon(&self, name: &str) -> Result<Url> {
        self.detail(POKEMON_PATH, name)
    }

    fn detail(&self, collection: &str, name: &str) -> Result<Url> {
        let name = normalize_name(name)?;
        Ok(self.base.join(collection)?.join(&format!("{name}/"))?)
    }
}

/// Normalizes a resource name typed by the user (trimmed, lower-case).
///
/// Rejects names that would escape their path segment.
pub fn normalize_name(raw: &str) -> Result<String> {
    let name = raw.trim().to_lowercase();
    let escapes = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(|c: char| matches!(c, '/' | '\\' | '?' | '#'));

    if escapes {
        return Err(PokedexError::InvalidName(raw.to_string()));
    }
    Ok(name)
}
