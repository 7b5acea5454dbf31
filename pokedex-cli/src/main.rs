//! Pokedex CLI
//!
//! Interactive explorer for the PokeAPI catalog, with a TTL response cache
//! in front of every request.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokedex_api::{ApiConfig, Catalog};
use pokedex_cache::{CacheConfig, ResponseCache};
use pokedex_core::constants::{
    DEFAULT_API_URL, DEFAULT_CACHE_TTL_SECS, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PAGE_SIZE,
};

mod command;
mod repl;
mod session;
#[cfg(test)]
mod test_support;

use session::Session;

/// Pokedex - explore the Pokémon world from your terminal
#[derive(Debug, Parser)]
#[command(name = "pokedex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// PokeAPI base URL
    #[arg(long, env = "POKEDEX_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Seconds a cached response stays fresh
    #[arg(long, env = "POKEDEX_CACHE_TTL", default_value_t = DEFAULT_CACHE_TTL_SECS)]
    cache_ttl: u64,

    /// Seconds between cache sweeps (defaults to the TTL)
    #[arg(long, env = "POKEDEX_SWEEP_INTERVAL")]
    sweep_interval: Option<u64>,

    /// Location areas per `map` page
    #[arg(long, env = "POKEDEX_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// HTTP request timeout in seconds
    #[arg(long, env = "POKEDEX_HTTP_TIMEOUT", default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    timeout: u64,
}

impl Cli {
    fn cache_config(&self) -> CacheConfig {
        let config = CacheConfig::new(Duration::from_secs(self.cache_ttl));
        match self.sweep_interval {
            Some(secs) => config.with_sweep_interval(Duration::from_secs(secs)),
            None => config,
        }
    }

    fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api_url.clone())
            .with_timeout(self.timeout)
            .with_page_size(self.page_size)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging on stderr so it never interleaves with the prompt
    let filter = if cli.verbose { "pokedex=debug,info" } else { "warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cache = Arc::new(
        ResponseCache::with_config(cli.cache_config()).context("Failed to start response cache")?,
    );
    let api_config = cli.api_config();
    let catalog = Catalog::connect(&api_config, Arc::clone(&cache))
        .context("Failed to create PokeAPI client")?;

    info!(api_url = %api_config.base_url, ttl_secs = cli.cache_ttl, "Pokedex ready");

    let mut session = Session::new(catalog, api_config.page_size);
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    println!("{}", "Welcome to the Pokedex! Type 'help' to get started.".cyan().bold());
    repl::run(&mut session, stdin, &mut stdout)
        .await
        .context("Prompt failed")?;

    cache.shutdown().await.context("Failed to stop response cache")?;
    println!("Closing the Pokedex... Goodbye!");

    Ok(())
}
