//! Domain types for the Pokedex client.
//!
//! Serde models of the PokeAPI documents the client reads:
//!
//! - [`NamedResource`]: `{ name, url }` reference used across the API
//! - [`LocationAreaPage`]: One page of the paginated location-area list
//! - [`LocationArea`]: Location-area detail with its Pokémon encounters
//! - [`Pokemon`]: Pokémon detail used by `catch` and `inspect`
//!
//! Unknown JSON fields are ignored so the models survive API additions.

mod location;
mod pokemon;
mod resource;

pub use location::*;
pub use pokemon::*;
pub use resource::*;
