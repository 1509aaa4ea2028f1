/// Timeline cue types
use crate::error::{MindfulError, Result};
use crate::types::SessionId;
use serde::{Deserialize, Serialize};

/// Cue identifier, assigned by the store
pub type CueId = i64;

/// A timestamped textual prompt on a session's timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    /// Store-assigned identifier (monotonically increasing)
    pub id: CueId,
    /// Session this cue belongs to
    pub session_id: SessionId,
    /// Offset into the audio track, in seconds
    pub time_sec: i64,
    /// Prompt shown or spoken at `time_sec`
    pub message: String,
}

/// Data required to insert a cue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCue {
    /// Session this cue belongs to
    pub session_id: SessionId,
    /// Offset into the audio track, in seconds
    pub time_sec: i64,
    /// Prompt text
    pub message: String,
}

impl NewCue {
    /// Create a new cue request
    pub fn new(session_id: SessionId, time_sec: i64, message: impl Into<String>) -> Self {
        Self {
            session_id,
            time_sec,
            message: message.into(),
        }
    }

    /// Check the input-only preconditions (session existence is checked by the caller)
    pub fn validate(&self) -> Result<()> {
        if self.time_sec < 0 {
            return Err(MindfulError::validation(format!(
                "cue time must be non-negative, got {}",
                self.time_sec
            )));
        }
        Ok(())
    }
}
