//! Error types for audio backends

use mindful_core::MindfulError;
use thiserror::Error;

/// Audio backend errors
#[derive(Debug, Error)]
pub enum AudioError {
    /// Media file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Player process could not be started
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Probe tool ran but reported failure or unusable output
    #[error("Probe failed: {0}")]
    Probe(String),

    /// Lofty could not read the file
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),

    /// Background task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for audio backend operations
pub type Result<T> = std::result::Result<T, AudioError>;

impl From<AudioError> for MindfulError {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::Spawn { .. } => MindfulError::playback(err.to_string()),
            other => MindfulError::media_probe(other.to_string()),
        }
    }
}
