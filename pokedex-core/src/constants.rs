//! Constants for the Pokedex client.
//!
//! Endpoint defaults mirror the public PokeAPI; catch-rate tuning values
//! shape the probability curve used by [`crate::capture::catch_probability`].

// ═══════════════════════════════════════════════════════════════════════════════
// REMOTE CATALOG
// ═══════════════════════════════════════════════════════════════════════════════

/// Base URL of the public PokeAPI (v2).
pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2/";

/// Path segment of the paginated location-area collection.
pub const LOCATION_AREA_PATH: &str = "location-area/";

/// Path segment of the Pokémon collection.
pub const POKEMON_PATH: &str = "pokemon/";

/// Number of location areas requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// HTTP request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

// ═══════════════════════════════════════════════════════════════════════════════
// RESPONSE CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Default time-to-live of cached responses, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 45;

// ═══════════════════════════════════════════════════════════════════════════════
// CATCH HEURISTIC
// ═══════════════════════════════════════════════════════════════════════════════

/// Probability of a catch before the difficulty modifier is applied.
pub const BASE_CATCH_RATE: f64 = 0.7;

/// Base experience at which the difficulty modifier bottoms out at zero
/// (before clamping).
pub const EXPERIENCE_SCALE: f64 = 1000.0;

/// Lower clamp of the difficulty modifier.
pub const MIN_DIFFICULTY_MODIFIER: f64 = 0.1;

/// Upper clamp of the difficulty modifier.
pub const MAX_DIFFICULTY_MODIFIER: f64 = 0.9;
