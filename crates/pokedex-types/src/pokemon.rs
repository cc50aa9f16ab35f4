//! The Pokemon detail record returned by `GET /pokemon/{id}`.
//!
//! Only the fields the viewer renders are modelled; everything else in the
//! upstream payload is ignored during deserialization. A fetched
//! [`Pokemon`] is never mutated afterwards.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::PokemonId;

/// A named link to another API resource (`{ "name": ..., "url": ... }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NamedResource {
    /// Resource name, e.g. `"overgrow"` or `"bulbasaur"`.
    #[serde(default)]
    pub name: String,
    /// Absolute URL of the resource.
    #[serde(default)]
    pub url: String,
}

impl NamedResource {
    /// Build a link from a name and URL.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// An unnamed link to another API resource (`{ "url": ... }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ApiResource {
    /// Absolute URL of the resource.
    pub url: String,
}

/// Front-facing sprite URLs. Either variant may be `null` upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Sprites {
    /// Normal coloration.
    #[serde(default)]
    pub front_default: Option<String>,
    /// Shiny (alternate) coloration.
    #[serde(default)]
    pub front_shiny: Option<String>,
}

/// One ability entry on a Pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AbilitySlot {
    /// The ability itself.
    pub ability: NamedResource,
    /// Whether this is the hidden ability.
    #[serde(default)]
    pub is_hidden: bool,
    /// Slot number (1-3).
    #[serde(default)]
    pub slot: u8,
}

/// One base-stat measurement on a Pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StatEntry {
    /// Base value of the stat (0-255).
    pub base_stat: u32,
    /// Effort value yield.
    #[serde(default)]
    pub effort: u32,
    /// Which stat this is (`hp`, `attack`, `special-attack`, ...).
    pub stat: NamedResource,
}

/// A catalog entity: the detail record for one Pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Pokemon {
    /// Catalog number.
    pub id: PokemonId,
    /// Lowercase API name, e.g. `"bulbasaur"`.
    pub name: String,
    /// Normal and shiny sprite URLs.
    #[serde(default)]
    pub sprites: Sprites,
    /// Abilities in slot order.
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    /// Base stats in API order.
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    /// Link to the species record, which in turn links the evolution chain.
    pub species: NamedResource,
}

impl Pokemon {
    /// Ability names in slot order.
    pub fn ability_names(&self) -> impl Iterator<Item = &str> {
        self.abilities.iter().map(|slot| slot.ability.name.as_str())
    }

    /// `(stat name, base value)` pairs in API order.
    pub fn stat_values(&self) -> impl Iterator<Item = (&str, u32)> {
        self.stats
            .iter()
            .map(|entry| (entry.stat.name.as_str(), entry.base_stat))
    }
}
