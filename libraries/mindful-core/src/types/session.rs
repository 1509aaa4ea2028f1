/// Listening session types
use serde::{Deserialize, Serialize};

/// Session identifier, assigned by the caller
pub type SessionId = i64;

/// A logical mindfulness-audio listening session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Externally assigned identifier
    pub id: SessionId,
    /// Display name
    pub name: String,
}

impl Session {
    /// Build a session named after its id (`"Session {id}"`)
    pub fn with_default_name(id: SessionId) -> Self {
        Self {
            id,
            name: Self::default_name(id),
        }
    }

    /// Name given to sessions created without an explicit one
    pub fn default_name(id: SessionId) -> String {
        format!("Session {id}")
    }
}
