//! Pokémon detail documents.

use serde::{Deserialize, Serialize};

use super::NamedResource;

/// Pokémon detail, trimmed to the fields the client uses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    /// Catalog identifier
    pub id: u32,
    /// Pokémon name
    pub name: String,
    /// Experience gained for defeating it; drives catch difficulty.
    /// Some newer entries publish `null`.
    #[serde(default)]
    pub base_experience: Option<u32>,
    /// Height in decimetres
    #[serde(default)]
    pub height: u32,
    /// Weight in hectograms
    #[serde(default)]
    pub weight: u32,
    /// Base stats (hp, attack, ...)
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    /// Elemental types, ordered by slot
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

/// One base stat entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonStat {
    /// Base value of the stat
    pub base_stat: u32,
    /// Which stat this is
    pub stat: NamedResource,
}

/// One type slot entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonType {
    /// Slot order (1 = primary)
    pub slot: u8,
    /// The type itself
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

impl Pokemon {
    /// Returns the base experience, treating a missing value as zero.
    pub fn experience(&self) -> u32 {
        self.base_experience.unwrap_or(0)
    }

    /// Iterates over `(stat name, base value)` pairs.
    pub fn stat_values(&self) -> impl Iterator<Item = (&str, u32)> {
        self.stats.iter().map(|s| (s.stat.name.as_str(), s.base_stat))
    }

    /// Returns the type names, ordered by slot.
    pub fn type_names(&self) -> Vec<&str> {
        let mut types: Vec<&PokemonType> = self.types.iter().collect();
        types.sort_by_key(|t| t.slot);
        types.into_iter().map(|t| t.kind.name.as_str()).collect()
    }
}
