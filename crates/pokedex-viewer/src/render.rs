//! Plain-text rendering of session snapshots.
//!
//! Every function takes an immutable view and returns the text to print, so
//! rendering can be tested without a terminal.

use pokedex_core::{Evolution, Ready};
use pokedex_types::Pokemon;

/// Highest possible base stat; bars are scaled against it.
const MAX_BASE_STAT: u32 = 255;

/// Width of a stat bar in characters.
const STAT_BAR_WIDTH: u32 = 20;

/// Shown while the roster is in flight.
pub fn loading() -> String {
    "Loading Pokémon...".to_owned()
}

/// Usage text.
pub fn help() -> String {
    [
        "Commands:",
        "  <number>     select by catalog number",
        "  <name>       select by name",
        "  n, next      select the next entry",
        "  p, prev      select the previous entry",
        "  l, list      show the roster",
        "  s, show      show the selected Pokémon again",
        "  h, help      show this help",
        "  q, quit      exit",
    ]
    .join("\n")
}

/// Upper-case the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// API slug to display label: first `-` becomes a space, then capitalised.
pub fn humanize(slug: &str) -> String {
    capitalize(&slug.replacen('-', " ", 1))
}

/// Fixed-width bar for a base stat.
pub fn stat_bar(value: u32) -> String {
    let filled = value.min(MAX_BASE_STAT).saturating_mul(STAT_BAR_WIDTH) / MAX_BASE_STAT;
    let empty = STAT_BAR_WIDTH.saturating_sub(filled);
    format!(
        "[{}{}]",
        "#".repeat(usize::try_from(filled).unwrap_or_default()),
        "-".repeat(usize::try_from(empty).unwrap_or_default())
    )
}

/// The roster list, marking the selection. Shows the load failure instead
/// when the roster could not be fetched.
pub fn roster(ready: &Ready) -> String {
    if let Some(reason) = ready.load_error() {
        return format!("Could not load the roster: {reason}");
    }
    if ready.roster().is_empty() {
        return "The roster is empty.".to_owned();
    }

    let selected = ready.selected().map(|pokemon| pokemon.id);
    let mut lines = vec![format!("Roster ({})", ready.roster().len())];
    lines.extend(ready.roster().iter().map(|pokemon| {
        let marker = if Some(pokemon.id) == selected { '>' } else { ' ' };
        format!("{marker} {} {}", pokemon.id, capitalize(&pokemon.name))
    }));
    lines.join("\n")
}

/// The detail panel for the selection.
pub fn detail(ready: &Ready) -> String {
    let Some(pokemon) = ready.selected() else {
        return "Nothing selected.".to_owned();
    };
    let mut lines = header(pokemon);
    lines.push("Evolution chain".to_owned());
    lines.extend(evolution(ready.evolution()));
    lines.join("\n")
}

fn header(pokemon: &Pokemon) -> Vec<String> {
    let mut lines = vec![
        format!("== {} {} ==", capitalize(&pokemon.name), pokemon.id),
        "Sprites".to_owned(),
        format!(
            "  Normal: {}",
            pokemon.sprites.front_default.as_deref().unwrap_or("(none)")
        ),
        format!(
            "  Shiny:  {}",
            pokemon.sprites.front_shiny.as_deref().unwrap_or("(none)")
        ),
        "Abilities".to_owned(),
    ];
    lines.extend(
        pokemon
            .ability_names()
            .map(|name| format!("  - {}", humanize(name))),
    );
    lines.push("Stats".to_owned());
    lines.extend(pokemon.stat_values().map(|(name, value)| {
        format!("  {:<16}{value:>4} {}", humanize(name), stat_bar(value))
    }));
    lines
}

fn evolution(evolution: &Evolution) -> Vec<String> {
    match evolution.names() {
        None => vec!["  (resolving...)".to_owned()],
        Some([]) => vec!["  Does not evolve".to_owned()],
        Some(names) => {
            let last = names.len().saturating_sub(1);
            names
                .iter()
                .enumerate()
                .map(|(index, name)| {
                    let arrow = if index < last { " →" } else { "" };
                    format!("  {}. {}{arrow}", index.saturating_add(1), capitalize(name))
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use pokedex_core::Session;
    use pokedex_types::{AbilitySlot, NamedResource, PokemonId, Sprites, StatEntry};

    use super::*;

    fn bulbasaur() -> Pokemon {
        Pokemon {
            id: PokemonId(1),
            name: "bulbasaur".to_owned(),
            sprites: Sprites {
                front_default: Some("https://example.test/1.png".to_owned()),
                front_shiny: None,
            },
            abilities: vec![AbilitySlot {
                ability: NamedResource::new("overgrow", "u"),
                is_hidden: false,
                slot: 1,
            }],
            stats: vec![StatEntry {
                base_stat: 65,
                effort: 1,
                stat: NamedResource::new("special-attack", "u"),
            }],
            species: NamedResource::new("bulbasaur", "u"),
        }
    }

    fn ivysaur() -> Pokemon {
        Pokemon {
            id: PokemonId(2),
            name: "ivysaur".to_owned(),
            ..bulbasaur()
        }
    }

    /// A loaded session whose first evolution result was `names`.
    fn session_with(names: Vec<String>) -> Session {
        let mut session = Session::new();
        if let Ok(Some(request)) = session.load_succeeded(vec![bulbasaur(), ivysaur()]) {
            session.evolution_resolved(request.ticket, names);
        }
        session
    }

    #[test]
    fn capitalize_and_humanize() {
        assert_eq!(capitalize("bulbasaur"), "Bulbasaur");
        assert_eq!(capitalize(""), "");
        assert_eq!(humanize("special-attack"), "Special attack");
        // Only the first dash is replaced.
        assert_eq!(humanize("a-b-c"), "A b-c");
    }

    #[test]
    fn stat_bar_scales_to_max() {
        assert_eq!(stat_bar(0), format!("[{}]", "-".repeat(20)));
        assert_eq!(stat_bar(255), format!("[{}]", "#".repeat(20)));
        assert_eq!(stat_bar(300), format!("[{}]", "#".repeat(20)));
        assert_eq!(stat_bar(51), format!("[####{}]", "-".repeat(16)));
    }

    #[test]
    fn roster_marks_selection() {
        let session = session_with(Vec::new());
        let text = session.ready().map(roster).unwrap_or_default();
        assert!(text.starts_with("Roster (2)"));
        assert!(text.contains("> #001 Bulbasaur"));
        assert!(text.contains("  #002 Ivysaur"));
    }

    #[test]
    fn roster_reports_load_failure() {
        let mut session = Session::new();
        assert!(session.load_failed("connection refused").is_ok());
        let text = session.ready().map(roster).unwrap_or_default();
        assert_eq!(text, "Could not load the roster: connection refused");
    }

    #[test]
    fn detail_lists_chain_with_arrows() {
        let session = session_with(vec![
            "bulbasaur".to_owned(),
            "ivysaur".to_owned(),
            "venusaur".to_owned(),
        ]);
        let text = session.ready().map(detail).unwrap_or_default();
        assert!(text.starts_with("== Bulbasaur #001 =="));
        assert!(text.contains("  Normal: https://example.test/1.png"));
        assert!(text.contains("  Shiny:  (none)"));
        assert!(text.contains("  - Overgrow"));
        assert!(text.contains("Special attack"));
        assert!(text.contains("  1. Bulbasaur →\n  2. Ivysaur →\n  3. Venusaur"));
    }

    #[test]
    fn single_stage_chain_is_listed_not_reported_as_no_evolution() {
        let session = session_with(vec!["bulbasaur".to_owned()]);
        let text = session.ready().map(detail).unwrap_or_default();
        assert!(text.ends_with("  1. Bulbasaur"));
        assert!(!text.contains("Does not evolve"));
    }

    #[test]
    fn empty_chain_reads_does_not_evolve() {
        let session = session_with(Vec::new());
        let text = session.ready().map(detail).unwrap_or_default();
        assert!(text.ends_with("  Does not evolve"));
    }

    #[test]
    fn pending_chain_reads_resolving() {
        let mut session = Session::new();
        assert!(session.load_succeeded(vec![bulbasaur()]).is_ok());
        let text = session.ready().map(detail).unwrap_or_default();
        assert!(text.ends_with("  (resolving...)"));
    }
}
