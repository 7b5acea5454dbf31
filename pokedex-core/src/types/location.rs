//! Location-area documents.
//!
//! The collection endpoint is paginated with `offset`/`limit` query
//! parameters and returns a [`LocationAreaPage`] envelope; the detail
//! endpoint returns a [`LocationArea`].

use serde::{Deserialize, Serialize};

use super::NamedResource;

/// One page of the location-area list.
///
/// # Wire Format (JSON)
/// ```text
/// { "count": 1054, "next": "...?offset=20&limit=20", "previous": null,
///   "results": [ { "name": "canalave-city-area", "url": "..." }, ... ] }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of location areas in the catalog
    pub count: u64,
    /// URL of the next page, absent on the last page
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, absent on the first page
    #[serde(default)]
    pub previous: Option<String>,
    /// Location areas on this page
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

impl LocationAreaPage {
    /// Iterates over the area names on this page, in API order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.name.as_str())
    }

    /// Returns true if there is no page after this one.
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

/// Location-area detail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationArea {
    /// Catalog identifier
    pub id: u32,
    /// Area name
    pub name: String,
    /// Pokémon that can be encountered here
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

impl LocationArea {
    /// Iterates over the names of the Pokémon encountered in this area.
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters.iter().map(|e| e.pokemon.name.as_str())
    }
}

/// A single encounter entry of a location area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonEncounter {
    /// The Pokémon that can be encountered
    pub pokemon: NamedResource,
}
