//! Error types for the viewer binary.
//!
//! Only configuration problems, HTTP client construction, and terminal I/O
//! are fatal. Fetch failures degrade session state instead of surfacing here.

use pokedex_client::ClientError;
use pokedex_core::SessionError;

/// Errors that stop the viewer.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// The API client could not be built.
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// A state transition was attempted out of order.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Writing to the terminal failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
