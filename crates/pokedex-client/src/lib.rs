//! HTTP access to the public Pokemon REST API.
//!
//! Three endpoints are used and no others:
//!
//! ```text
//! GET {base}/pokemon/{id}      --> Pokemon       (Roster Loader, N in parallel)
//! GET {pokemon.species.url}    --> Species       (Evolution Resolver, step 1)
//! GET {evolution_chain.url}    --> EvolutionChain (Evolution Resolver, step 2)
//! ```
//!
//! # Modules
//!
//! - [`client`] -- `reqwest`-backed [`PokeApiClient`]
//! - [`roster`] -- all-or-nothing concurrent roster load
//! - [`evolution`] -- species -> chain -> flattened names
//! - [`error`] -- [`ClientError`]

pub mod client;
pub mod error;
pub mod evolution;
pub mod roster;

pub use client::{ClientConfig, DEFAULT_BASE_URL, PokeApiClient};
pub use error::ClientError;
pub use evolution::{resolve, try_resolve};
pub use roster::load_roster;
