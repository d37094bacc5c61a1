use thiserror::Error;

/// Failures of the upstream clients and of configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (connect, TLS, body read).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("{endpoint} responded with status {status}")]
    UnexpectedStatus {
        /// Which upstream answered.
        endpoint: &'static str,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body was not the expected JSON.
    #[error("Deserialization error: {0}")]
    DeserializationError(#[from] serde_json::Error),

    /// A setting was present but unusable.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Socket or listener failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the upstream answered with a non-success status code.
    pub fn is_status(&self) -> bool {
        matches!(self, Error::UnexpectedStatus { .. })
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
