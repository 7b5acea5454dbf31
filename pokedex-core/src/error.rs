//! Error types for the Pokedex client.
//!
//! This module provides a single error hierarchy using `thiserror`.
//! Cache operations, network fetches and command handling all report
//! through [`PokedexError`].

use thiserror::Error;

/// Result type alias using `PokedexError`.
pub type Result<T> = std::result::Result<T, PokedexError>;

/// Main error type for all Pokedex operations.
#[derive(Debug, Error)]
pub enum PokedexError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CACHE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A cache TTL or sweep interval was zero.
    #[error("Invalid cache duration: {0}")]
    InvalidTtl(String),

    /// Shutdown was requested on a cache that is already stopped.
    #[error("Cache already stopped")]
    CacheStopped,

    /// The cache was constructed outside of a Tokio runtime.
    #[error("No Tokio runtime available to run the cache sweeper")]
    NoRuntime,

    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The catalog answered with a non-success status.
    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Request timed out.
    #[error("Request timed out: {0}")]
    Timeout(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // DATA ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Malformed catalog URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Resource name that cannot be placed in a URL path.
    #[error("Invalid resource name: '{0}'")]
    InvalidName(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // COMMAND ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Unknown REPL verb.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A command was invoked without its required argument.
    #[error("Missing argument for '{command}': usage is '{usage}'")]
    MissingArgument { command: String, usage: String },

    /// `inspect` was asked about a Pokémon that is not in the Pokedex.
    #[error("You have not caught {0}")]
    NotCaught(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // INTERNAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Terminal I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl PokedexError {
    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        match self {
            PokedexError::HttpError(_) | PokedexError::Timeout(_) => true,
            PokedexError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns true if this error comes from the response cache.
    pub fn is_cache_error(&self) -> bool {
        matches!(
            self,
            PokedexError::InvalidTtl(_) | PokedexError::CacheStopped | PokedexError::NoRuntime
        )
    }

    /// Returns true if this error was caused by user input at the prompt.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PokedexError::UnknownCommand(_)
                | PokedexError::MissingArgument { .. }
                | PokedexError::NotCaught(_)
                | PokedexError::InvalidName(_)
        )
    }
}
