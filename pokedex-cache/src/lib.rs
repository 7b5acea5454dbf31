//! Time-boxed response cache for the Pokedex client.
//!
//! In-memory key/value store whose entries expire after a fixed TTL and are
//! reclaimed by a periodic background sweep rather than on access.

mod cache;

pub use cache::{CacheConfig, CacheStats, ResponseCache};
