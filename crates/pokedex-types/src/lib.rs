//! Shared type definitions for the Pokedex viewer.
//!
//! This crate is the single source of truth for the records fetched from the
//! public Pokemon REST API and for the one piece of pure logic the viewer
//! owns: flattening an evolution-chain tree into display order. Types derive
//! `ts-rs` so a web front-end can consume the same shapes.
//!
//! # Modules
//!
//! - [`ids`] -- Catalog identifier newtype
//! - [`pokemon`] -- Entity detail record (sprites, abilities, stats, species link)
//! - [`evolution`] -- Species and evolution-chain records, pre-order flatten

pub mod evolution;
pub mod ids;
pub mod pokemon;

pub use evolution::{ChainTooDeep, EvolutionChain, EvolutionNode, MAX_CHAIN_DEPTH, Species};
pub use ids::PokemonId;
pub use pokemon::{AbilitySlot, ApiResource, NamedResource, Pokemon, Sprites, StatEntry};
