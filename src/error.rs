//! Error types for chat-commander.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Membership directory error: {0}")]
    Membership(String),

    #[error("Publish error: {0}")]
    Publish(String),

    /// Internally constructed state could not be serialized. Never recovered.
    #[error("failed to marshal {what}: {source}")]
    Serialization {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Whether the command loop has to stop after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Serialization { .. })
    }

    pub fn serialization(what: &'static str, source: serde_json::Error) -> Self {
        Error::Serialization { what, source }
    }
}
