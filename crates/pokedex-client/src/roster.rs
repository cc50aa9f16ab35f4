//! Roster Loader: fetch a contiguous range of detail records at once.
//!
//! Every request is created up front and driven concurrently by
//! [`try_join_all`], which yields results in input order no matter which
//! request finishes first. The first failure aborts the remaining requests
//! and fails the whole load, so callers never see a partial roster.

use std::ops::RangeInclusive;
use std::time::Instant;

use futures::future::try_join_all;
use pokedex_types::{Pokemon, PokemonId};
use tracing::{info, warn};

use crate::client::PokeApiClient;
use crate::error::ClientError;

/// Load the detail records for every id in `ids`, ascending.
///
/// # Errors
///
/// Returns [`ClientError::Config`] if the range is empty or includes `0`,
/// and otherwise the first error reported by any individual fetch.
pub async fn load_roster(
    client: &PokeApiClient,
    ids: RangeInclusive<u32>,
) -> Result<Vec<Pokemon>, ClientError> {
    let first = PokemonId::new(*ids.start())
        .ok_or_else(|| ClientError::Config("roster ids start at 1".to_owned()))?;
    if ids.is_empty() {
        return Err(ClientError::Config(format!(
            "empty roster range {}..={}",
            ids.start(),
            ids.end()
        )));
    }

    let started = Instant::now();
    let requests = ids.clone().map(|raw| client.pokemon(PokemonId(raw)));

    match try_join_all(requests).await {
        Ok(roster) => {
            info!(
                first_id = first.into_inner(),
                roster_size = roster.len(),
                elapsed_ms = started.elapsed().as_millis(),
                "roster loaded"
            );
            Ok(roster)
        }
        Err(e) => {
            warn!(
                first_id = first.into_inner(),
                last_id = *ids.end(),
                error = %e,
                "roster load failed"
            );
            Err(e)
        }
    }
}
