//! # Pokedex API
//!
//! Remote catalog access for the Pokedex client.
//!
//! - [`PokeApiClient`] fetches raw documents over HTTP
//! - [`Endpoints`] builds the normalized request URLs used as cache keys
//! - [`Catalog`] puts a [`pokedex_cache::ResponseCache`] in front of any
//!   [`pokedex_core::CatalogSource`] and decodes the typed records

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod catalog;
mod client;
mod endpoints;

pub use catalog::{Catalog, Fetched};
pub use client::{ApiConfig, PokeApiClient};
pub use endpoints::{normalize_name, Endpoints};
