//! `reqwest`-backed client for the Pokemon REST API.
//!
//! The client is cheap to clone (the inner [`reqwest::Client`] is
//! reference-counted), so each spawned resolution task takes its own copy.

use std::time::Duration;

use pokedex_types::{EvolutionChain, MAX_CHAIN_DEPTH, Pokemon, PokemonId, Species};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ClientError;

/// Public PokeAPI root.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// `User-Agent` sent with every request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`PokeApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, without a trailing slash (e.g. `https://pokeapi.co/api/v2`).
    pub base_url: String,
    /// Per-request timeout. `None` lets a hung request wait forever.
    pub request_timeout: Option<Duration>,
    /// Deepest evolution tree the resolver will flatten.
    pub max_chain_depth: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            request_timeout: Some(Duration::from_secs(10)),
            max_chain_depth: MAX_CHAIN_DEPTH,
        }
    }
}

/// Read-only client for the three endpoints the viewer uses.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
    max_chain_depth: usize,
}

impl PokeApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the base URL is empty or the
    /// underlying HTTP client cannot be constructed (e.g. TLS init failure).
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            return Err(ClientError::Config("base URL is empty".to_owned()));
        }

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            max_chain_depth: config.max_chain_depth,
        })
    }

    /// API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Depth bound applied when flattening evolution chains.
    pub const fn max_chain_depth(&self) -> usize {
        self.max_chain_depth
    }

    /// URL of the detail record for `id`.
    pub fn pokemon_url(&self, id: PokemonId) -> String {
        format!("{}/pokemon/{}", self.base_url, id.into_inner())
    }

    /// `GET {base}/pokemon/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or
    /// an unexpected body.
    pub async fn pokemon(&self, id: PokemonId) -> Result<Pokemon, ClientError> {
        self.get_json(&self.pokemon_url(id)).await
    }

    /// `GET` a species record by the URL stored on a [`Pokemon`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or
    /// an unexpected body.
    pub async fn species(&self, url: &str) -> Result<Species, ClientError> {
        self.get_json(url).await
    }

    /// `GET` an evolution-chain record by the URL stored on a [`Species`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or
    /// an unexpected body.
    pub async fn evolution_chain(&self, url: &str) -> Result<EvolutionChain, ClientError> {
        self.get_json(url).await
    }

    /// Fetch `url` and decode the body as `T`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        debug!(url, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Request {
                url: url.to_owned(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| ClientError::Request {
            url: url.to_owned(),
            message: e.to_string(),
        })?;

        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            url: url.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ClientConfig {
            base_url: "http://localhost:8080/api/v2/".to_owned(),
            ..ClientConfig::default()
        };
        let client = PokeApiClient::new(&config);
        assert!(client.is_ok());
        let Ok(client) = client else { return };
        assert_eq!(client.base_url(), "http://localhost:8080/api/v2");
        assert_eq!(
            client.pokemon_url(PokemonId(25)),
            "http://localhost:8080/api/v2/pokemon/25"
        );
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let config = ClientConfig {
            base_url: "/".to_owned(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            PokeApiClient::new(&config),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn defaults_target_public_api() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_chain_depth, MAX_CHAIN_DEPTH);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(10)));
    }
}
