//! Evolution Resolver: Pokemon -> species -> evolution chain -> names.
//!
//! The two fetches are strictly sequential because the chain URL is only
//! known once the species record arrives. [`resolve`] never fails: any error
//! is logged and degrades to an empty sequence, which the viewer renders as
//! "does not evolve".

use pokedex_types::Pokemon;
use tracing::{debug, warn};

use crate::client::PokeApiClient;
use crate::error::ClientError;

/// Resolve the flattened evolution sequence for `pokemon`.
///
/// # Errors
///
/// Returns [`ClientError`] if either fetch fails, the species record has no
/// chain link, or the chain is deeper than the client's depth bound.
pub async fn try_resolve(
    client: &PokeApiClient,
    pokemon: &Pokemon,
) -> Result<Vec<String>, ClientError> {
    let species = client.species(&pokemon.species.url).await?;
    let chain_url = species
        .evolution_chain
        .map(|link| link.url)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ClientError::MissingEvolutionChain(pokemon.species.url.clone()))?;

    let record = client.evolution_chain(&chain_url).await?;
    let names = record.chain.try_flatten(client.max_chain_depth())?;

    debug!(
        pokemon = pokemon.name,
        chain_id = record.id,
        stages = names.len(),
        "evolution chain resolved"
    );
    Ok(names)
}

/// Resolve the evolution sequence, degrading any failure to an empty list.
pub async fn resolve(client: &PokeApiClient, pokemon: &Pokemon) -> Vec<String> {
    match try_resolve(client, pokemon).await {
        Ok(names) => names,
        Err(e) => {
            warn!(
                pokemon = pokemon.name,
                id = pokemon.id.into_inner(),
                error = %e,
                "evolution resolution failed, showing no evolutions"
            );
            Vec::new()
        }
    }
}
