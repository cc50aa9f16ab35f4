//! Catalog identifier for a single Pokemon.
//!
//! The upstream API numbers its catalog from 1. The id is carried as a
//! newtype so it cannot be confused with stat values or list indices.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// National catalog number of a Pokemon (`GET /pokemon/{id}`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct PokemonId(pub u32);

impl PokemonId {
    /// Build an identifier, rejecting `0` (the catalog starts at 1).
    pub const fn new(raw: u32) -> Option<Self> {
        if raw == 0 { None } else { Some(Self(raw)) }
    }

    /// Return the raw catalog number.
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

/// Formats as the zero-padded catalog label, e.g. `#001`.
impl core::fmt::Display for PokemonId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{:03}", self.0)
    }
}

impl From<PokemonId> for u32 {
    fn from(id: PokemonId) -> Self {
        id.0
    }
}
