//! # Pokedex Core
//!
//! Core types, errors, and traits shared by every Pokedex crate.
//!
//! This crate provides the foundational building blocks used by the cache,
//! the PokeAPI client and the interactive CLI:
//!
//! - **Types**: Serde models for the catalog records (location areas, Pokémon)
//! - **Errors**: A single error enum with classification helpers
//! - **Constants**: Endpoint defaults, cache defaults and catch-rate tuning
//! - **Traits**: The [`CatalogSource`] seam between the catalog and the network
//! - **Capture**: The catch heuristic and the [`Pokedex`] capture log
//!
//! ## Example
//!
//! ```rust
//! use pokedex_core::{LocationAreaPage, PokedexError};
//!
//! let page: LocationAreaPage = serde_json::from_str(
//!     r#"{"count":1,"next":null,"previous":null,"results":[{"name":"canalave-city-area","url":"u"}]}"#,
//! ).unwrap();
//! assert_eq!(page.results[0].name, "canalave-city-area");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod capture;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use capture::{attempt_catch, catch_probability, CaughtPokemon, Pokedex};
pub use constants::*;
pub use error::{PokedexError, Result};
pub use traits::*;
pub use types::*;
