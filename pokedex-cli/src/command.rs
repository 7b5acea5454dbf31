//! Prompt verbs and their parsing.

use pokedex_core::error::{PokedexError, Result};

/// A parsed prompt command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
}

/// Help-table entry for one verb.
pub struct CommandInfo {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "help",
        usage: "help",
        description: "Displays a help message",
    },
    CommandInfo {
        name: "exit",
        usage: "exit",
        description: "Exit the Pokedex",
    },
    CommandInfo {
        name: "map",
        usage: "map",
        description: "Display the next page of location areas",
    },
    CommandInfo {
        name: "mapb",
        usage: "mapb",
        description: "Display the previous page of location areas",
    },
    CommandInfo {
        name: "explore",
        usage: "explore <area>",
        description: "List the Pokémon found in a location area",
    },
    CommandInfo {
        name: "catch",
        usage: "catch <pokemon>",
        description: "Throw a Pokeball at a Pokémon",
    },
    CommandInfo {
        name: "inspect",
        usage: "inspect <pokemon>",
        description: "Show details of a caught Pokémon",
    },
    CommandInfo {
        name: "pokedex",
        usage: "pokedex",
        description: "List every Pokémon you have caught",
    },
];

impl Command {
    /// Parses one prompt line. Blank lines yield `None`.
    ///
    /// The verb is case-insensitive; words after the argument are ignored.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let verb = verb.to_lowercase();
        let arg = words.next();

        let command = match verb.as_str() {
            "help" => Command::Help,
            "exit" => Command::Exit,
            "map" => Command::Map,
            "mapb" => Command::MapBack,
            "explore" => Command::Explore(required("explore", arg)?),
            "catch" => Command::Catch(required("catch", arg)?),
            "inspect" => Command::Inspect(required("inspect", arg)?),
            "pokedex" => Command::Pokedex,
            _ => return Err(PokedexError::UnknownCommand(verb)),
        };

        Ok(Some(command))
    }
}

fn required(name: &str, arg: Option<&str>) -> Result<String> {
    arg.map(str::to_string)
        .ok_or_else(|| PokedexError::MissingArgument {
            command: name.to_string(),
            usage: COMMANDS
                .iter()
                .find(|info| info.name == name)
                .map_or(name, |info| info.usage)
                .to_string(),
        })
}
