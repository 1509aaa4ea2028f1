/// Playback progress persisted per session
use crate::types::SessionId;
use serde::{Deserialize, Serialize};

/// Last known playback position of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackProgress {
    /// Row identifier
    pub id: i64,
    /// Session the position belongs to
    pub session_id: SessionId,
    /// Position in whole seconds from the start of the track
    pub last_position: i64,
    /// Last update timestamp (Unix epoch seconds)
    pub updated_at: i64,
}
