//! Terminal Pokédex entry point.
//!
//! Loads a roster of Pokémon from the public REST API, shows the selected
//! entry's sprites, abilities and stats, and resolves its evolution chain on
//! every selection change.
//!
//! # Architecture
//!
//! ```text
//! PokeAPI --> Roster Loader (N parallel GETs) --\
//!                                                +--> Session --> render --> stdout
//! PokeAPI --> Evolution Resolver (2 GETs) ------/        ^
//!                                                        |
//!                                          stdin commands (selection)
//! ```
//!
//! The event loop is single-threaded and cooperative. Fetch failures degrade
//! the display (empty roster, "does not evolve") instead of stopping it.

mod app;
mod command;
mod config;
mod error;
mod render;

use pokedex_client::PokeApiClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::ViewerConfig;

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// builds the API client, then runs the event loop until the user quits or
/// input ends.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the HTTP client cannot be
/// built, or writing to the terminal fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never interleave with the rendered views.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("pokedex-viewer starting");

    let config = ViewerConfig::from_env()?;
    let roster_ids = config.roster_ids()?;
    info!(
        base_url = config.client.base_url,
        first_id = *roster_ids.start(),
        last_id = *roster_ids.end(),
        request_timeout_ms = config.client.request_timeout.map_or(0, |t| t.as_millis()),
        max_chain_depth = config.client.max_chain_depth,
        "configuration loaded"
    );

    let client = PokeApiClient::new(&config.client)?;
    App::new(client, roster_ids, std::io::stdout()).run().await?;

    Ok(())
}
