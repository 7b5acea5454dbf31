//! Session state and command handlers.

use std::io::Write;

use colored::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use pokedex_api::Catalog;
use pokedex_core::capture::{attempt_catch, Pokedex};
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::traits::CatalogSource;
use pokedex_core::types::LocationAreaPage;

use crate::command::{Command, COMMANDS};

/// Pagination cursor over the location-area list.
///
/// `offset` always points one page past the page on screen, so `map`
/// fetches at `offset` and `mapb` steps back two pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageState {
    pub offset: u32,
    pub limit: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    /// Set once a fetched page reports that nothing follows it
    pub reached_end: bool,
}

impl PageState {
    pub fn new(limit: u32) -> Self {
        Self {
            offset: 0,
            limit,
            next: None,
            previous: None,
            reached_end: false,
        }
    }

    fn record(&mut self, page: &LocationAreaPage) {
        self.next = page.next.clone();
        self.previous = page.previous.clone();
        self.reached_end = page.is_last();
        self.offset = self.offset.saturating_add(self.limit);
    }

    fn on_first_page(&self) -> bool {
        self.offset <= self.limit
    }

    fn on_last_page(&self) -> bool {
        self.reached_end
    }
}

/// What the prompt loop should do after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive session: catalog access, paging cursor and capture log.
pub struct Session<S> {
    catalog: Catalog<S>,
    pokedex: Pokedex,
    page: PageState,
    rng: StdRng,
}

impl<S: CatalogSource> Session<S> {
    pub fn new(catalog: Catalog<S>, page_size: u32) -> Self {
        Self {
            catalog,
            pokedex: Pokedex::new(),
            page: PageState::new(page_size),
            rng: StdRng::from_entropy(),
        }
    }

    /// Replaces the catch RNG, for reproducible sessions.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    /// Runs one command, writing user-facing output to `out`.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        debug!(?command, "Executing command");

        match command {
            Command::Help => self.help(out)?,
            Command::Exit => return Ok(Flow::Exit),
            Command::Map => self.map(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => self.explore(&area, out).await?,
            Command::Catch(name) => self.catch(&name, out).await?,
            Command::Inspect(name) => self.inspect(&name, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
        }

        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", "Welcome to the Pokedex!".cyan().bold())?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for info in COMMANDS {
            writeln!(out, "  {:<18} {}", info.usage.yellow(), info.description)?;
        }
        writeln!(out)?;
        Ok(())
    }

    async fn map<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.page.on_last_page() {
            writeln!(out, "{}", "You're on the last page. Cannot go forward.".yellow())?;
            return Ok(());
        }
        self.show_page(out).await
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.page.on_first_page() {
            writeln!(out, "{}", "You're on the first page. Cannot go back.".yellow())?;
            return Ok(());
        }
        self.page.offset = self
            .page
            .offset
            .saturating_sub(self.page.limit.saturating_mul(2));
        self.show_page(out).await
    }

    async fn show_page<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let fetched = self
            .catalog
            .location_areas(self.page.offset, self.page.limit)
            .await?;
        if fetched.from_cache {
            writeln!(out, "{}", "(using cached data)".dimmed())?;
        }

        for name in fetched.value.names() {
            writeln!(out, "{}", name)?;
        }
        self.page.record(&fetched.value);
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Exploring {}...", area.cyan())?;
        let fetched = self.catalog.location_area(area).await?;
        if fetched.from_cache {
            writeln!(out, "{}", "(using cached data)".dimmed())?;
        }

        let area = fetched.value;
        if area.pokemon_encounters.is_empty() {
            writeln!(out, "No Pokémon found in {}.", area.name)?;
            return Ok(());
        }

        writeln!(out, "{}", "Found Pokémon:".green())?;
        for name in area.pokemon_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        let pokemon = self.catalog.pokemon(name).await?.value;
        writeln!(out, "Throwing a Pokeball at {}...", pokemon.name.cyan())?;

        if attempt_catch(pokemon.experience(), &mut self.rng) {
            writeln!(out, "{}", format!("{} was caught!", pokemon.name).green().bold())?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.add(pokemon);
        } else {
            writeln!(out, "{}", format!("{} escaped!", pokemon.name).yellow())?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let key = name.trim().to_lowercase();
        let caught = self
            .pokedex
            .get(&key)
            .ok_or_else(|| PokedexError::NotCaught(key.clone()))?;
        let pokemon = caught.pokemon;

        writeln!(out, "{} {}", "Name:".dimmed(), pokemon.name)?;
        writeln!(out, "{} {}", "Height:".dimmed(), pokemon.height)?;
        writeln!(out, "{} {}", "Weight:".dimmed(), pokemon.weight)?;
        writeln!(out, "{}", "Stats:".dimmed())?;
        for (stat, value) in pokemon.stat_values() {
            writeln!(out, "  -{}: {}", stat, value)?;
        }
        writeln!(out, "{}", "Types:".dimmed())?;
        for kind in pokemon.type_names() {
            writeln!(out, "  - {}", kind)?;
        }
        writeln!(
            out,
            "{} {}",
            "Caught:".dimmed(),
            caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty. Try 'catch <pokemon>'.")?;
            return Ok(());
        }

        writeln!(out, "{}", "Your Pokedex:".green().bold())?;
        for name in self.pokedex.names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }
}
