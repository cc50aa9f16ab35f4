//! Session state for the Pokedex viewer.
//!
//! The viewer's mutable state lives in exactly one place, [`Session`], and
//! changes only through its transition functions. Views receive `&Session`
//! and never mutate it.
//!
//! # Modules
//!
//! - [`session`] -- `Loading -> Ready` state machine and stale-result guard

pub mod session;

pub use session::{Evolution, Phase, Ready, ResolveRequest, ResolveTicket, Session, SessionError};
