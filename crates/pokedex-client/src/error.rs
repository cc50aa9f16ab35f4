//! Error types for the API client.
//!
//! Every failure carries the URL it happened on so a `warn!` line is enough
//! to reproduce it with `curl`.

use pokedex_types::ChainTooDeep;

/// Errors that can occur while talking to the REST API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {message}")]
    Request {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The body was not the expected JSON shape.
    #[error("unexpected response shape from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The species record had no evolution-chain link.
    #[error("species record {0} has no evolution chain link")]
    MissingEvolutionChain(String),

    /// The evolution tree exceeded the configured depth bound.
    #[error(transparent)]
    ChainTooDeep(#[from] ChainTooDeep),

    /// The client or a roster request was configured incorrectly.
    #[error("config error: {0}")]
    Config(String),
}
