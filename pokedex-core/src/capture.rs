//! Catch heuristic and the capture log.
//!
//! The chance of catching a Pokémon falls linearly with its base experience
//! and is clamped so that every Pokémon stays catchable and none is free:
//!
//! ```text
//! p = BASE_CATCH_RATE * clamp(1 - base_experience / 1000, 0.1, 0.9)
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BASE_CATCH_RATE, EXPERIENCE_SCALE, MAX_DIFFICULTY_MODIFIER, MIN_DIFFICULTY_MODIFIER,
};
use crate::types::Pokemon;

/// Returns the probability in `[0, 1]` of catching a Pokémon with the given
/// base experience.
pub fn catch_probability(base_experience: u32) -> f64 {
    let modifier = (1.0 - f64::from(base_experience) / EXPERIENCE_SCALE)
        .clamp(MIN_DIFFICULTY_MODIFIER, MAX_DIFFICULTY_MODIFIER);
    BASE_CATCH_RATE * modifier
}

/// Rolls a single catch attempt.
pub fn attempt_catch<R: Rng + ?Sized>(base_experience: u32, rng: &mut R) -> bool {
    let roll: f64 = rng.gen();
    roll <= catch_probability(base_experience)
}

/// A Pokémon recorded in the capture log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaughtPokemon {
    /// Detail record fetched at catch time
    pub pokemon: Pokemon,
    /// When it was caught
    pub caught_at: DateTime<Utc>,
}

/// Capture log of every Pokémon caught during a session.
///
/// Thread-safe; owned by the session that performs the catches.
#[derive(Debug, Default)]
pub struct Pokedex {
    entries: RwLock<BTreeMap<String, CaughtPokemon>>,
}

impl Pokedex {
    /// Creates an empty Pokedex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a caught Pokémon. Catching the same species again replaces
    /// the stored record.
    pub fn add(&self, pokemon: Pokemon) {
        let name = pokemon.name.clone();
        self.entries.write().insert(
            name,
            CaughtPokemon {
                pokemon,
                caught_at: Utc::now(),
            },
        );
    }

    /// Gets a caught Pokémon by name.
    pub fn get(&self, name: &str) -> Option<CaughtPokemon> {
        self.entries.read().get(name).cloned()
    }

    /// Returns true if the Pokémon has been caught.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Names of all caught Pokémon, sorted.
    pub fn names(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// Returns the number of caught Pokémon.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing has been caught yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
