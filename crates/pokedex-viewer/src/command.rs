//! Line commands read from standard input.

use std::str::FromStr;

use pokedex_types::PokemonId;

/// One user selection or view event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Select by catalog number (`25`).
    Select(PokemonId),
    /// Select by name (`pikachu`).
    SelectName(String),
    /// Select the next roster entry (`n`, `next`).
    Next,
    /// Select the previous roster entry (`p`, `prev`).
    Previous,
    /// Print the roster (`l`, `list`).
    List,
    /// Reprint the detail panel (`s`, `show`).
    Show,
    /// Print usage (`h`, `help`, `?`).
    Help,
    /// Exit (`q`, `quit`, `exit`).
    Quit,
}

/// Input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Nothing but whitespace.
    #[error("empty input")]
    Empty,
    /// `0` is not a catalog number.
    #[error("catalog numbers start at 1")]
    ZeroId,
    /// More than one word.
    #[error("unrecognised input {0:?}, type `help` for commands")]
    Unrecognised(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Err(CommandError::Empty);
        };
        if words.next().is_some() {
            return Err(CommandError::Unrecognised(line.trim().to_owned()));
        }

        if let Ok(raw) = word.parse::<u32>() {
            return PokemonId::new(raw)
                .map(Self::Select)
                .ok_or(CommandError::ZeroId);
        }

        let command = match word.to_ascii_lowercase().as_str() {
            "n" | "next" => Self::Next,
            "p" | "prev" | "previous" => Self::Previous,
            "l" | "list" => Self::List,
            "s" | "show" => Self::Show,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            name => Self::SelectName(name.to_owned()),
        };
        Ok(command)
    }
}
