/// Core error types for the mindfulness audio backend
use thiserror::Error;

/// Result type alias using `MindfulError`
pub type Result<T> = std::result::Result<T, MindfulError>;

/// Core error type shared by every crate in the workspace
#[derive(Error, Debug)]
pub enum MindfulError {
    /// Any failure reported by the storage facility
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Probing a media file failed or timed out
    #[error("Media probe error: {0}")]
    MediaProbe(String),

    /// The audio output could not start or stop playback
    #[error("Playback error: {0}")]
    Playback(String),

    /// Operation is meaningless in the current playback state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Malformed caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up
        entity: String,
        /// Identifier that was not found
        id: String,
    },

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MindfulError {
    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create a media probe error
    pub fn media_probe(msg: impl Into<String>) -> Self {
        Self::MediaProbe(msg.into())
    }

    /// Create a playback error
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}
