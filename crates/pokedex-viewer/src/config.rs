//! Configuration for the viewer.
//!
//! All configuration is loaded from environment variables. Every variable is
//! optional; the defaults reproduce the original 30-entry roster against the
//! public API.

use std::ops::RangeInclusive;
use std::time::Duration;

use pokedex_client::{ClientConfig, DEFAULT_BASE_URL};
use pokedex_types::MAX_CHAIN_DEPTH;

use crate::error::ViewerError;

/// Complete viewer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// API connection settings.
    pub client: ClientConfig,
    /// First catalog id in the roster.
    pub roster_first_id: u32,
    /// Number of roster entries.
    pub roster_size: u32,
}

impl ViewerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `POKEAPI_BASE_URL` -- API root (default `https://pokeapi.co/api/v2`)
    /// - `ROSTER_FIRST_ID` -- first catalog id (default 1)
    /// - `ROSTER_SIZE` -- number of entries to load (default 30)
    /// - `REQUEST_TIMEOUT_MS` -- per-request timeout, `0` disables (default 10000)
    /// - `MAX_CHAIN_DEPTH` -- evolution tree depth bound, at least 1 (default 64)
    pub fn from_env() -> Result<Self, ViewerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ViewerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("POKEAPI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        let roster_first_id: u32 = parse_or(&lookup, "ROSTER_FIRST_ID", 1)?;
        if roster_first_id == 0 {
            return Err(ViewerError::Config(
                "ROSTER_FIRST_ID must be at least 1".to_owned(),
            ));
        }

        let roster_size: u32 = parse_or(&lookup, "ROSTER_SIZE", 30)?;
        if roster_size == 0 {
            return Err(ViewerError::Config(
                "ROSTER_SIZE must be at least 1".to_owned(),
            ));
        }

        let request_timeout_ms: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_MS", 10_000)?;
        let max_chain_depth: usize = parse_or(&lookup, "MAX_CHAIN_DEPTH", MAX_CHAIN_DEPTH)?;
        if max_chain_depth == 0 {
            return Err(ViewerError::Config(
                "MAX_CHAIN_DEPTH must be at least 1".to_owned(),
            ));
        }

        let config = Self {
            client: ClientConfig {
                base_url,
                request_timeout: (request_timeout_ms > 0)
                    .then(|| Duration::from_millis(request_timeout_ms)),
                max_chain_depth,
            },
            roster_first_id,
            roster_size,
        };
        config.roster_ids()?;
        Ok(config)
    }

    /// Catalog ids to load, ascending.
    pub fn roster_ids(&self) -> Result<RangeInclusive<u32>, ViewerError> {
        let last = self
            .roster_size
            .checked_sub(1)
            .and_then(|span| self.roster_first_id.checked_add(span))
            .ok_or_else(|| {
                ViewerError::Config(format!(
                    "roster of {} starting at {} is out of range",
                    self.roster_size, self.roster_first_id
                ))
            })?;
        Ok(self.roster_first_id..=last)
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ViewerError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| ViewerError::Config(format!("invalid {name}: {e}")))
    })
}
