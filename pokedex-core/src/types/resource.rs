//! Named references shared by every PokeAPI document.

use serde::{Deserialize, Serialize};

/// A `{ name, url }` pointer to another catalog resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    /// Resource name (e.g. "pikachu", "canalave-city-area")
    pub name: String,
    /// Absolute URL of the resource detail
    #[serde(default)]
    pub url: String,
}
