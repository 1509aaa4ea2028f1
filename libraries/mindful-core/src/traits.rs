/// Collaborator traits for the audio session manager
use crate::error::Result;
use crate::types::{Cue, MediaInfo, NewCue, PlayRequest, PlaybackId, PlaybackProgress, Session, SessionId};
use async_trait::async_trait;
use std::path::Path;

/// Durable storage for sessions, cues and playback progress
///
/// Implementations must report every failure as `MindfulError::Persistence`
/// (or a more specific variant); nothing is swallowed.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert the session if no row with `session.id` exists
    ///
    /// Must never overwrite an existing row. Returns `true` if a row was created.
    async fn ensure_session(&self, session: &Session) -> Result<bool>;

    /// Check whether a session row exists
    async fn session_exists(&self, id: SessionId) -> Result<bool>;

    /// Get a session by id
    async fn get_session(&self, id: SessionId) -> Result<Option<Session>>;

    /// Get all sessions ordered by id
    async fn list_sessions(&self) -> Result<Vec<Session>>;

    /// Insert a cue and return it with its generated id
    async fn add_cue(&self, cue: &NewCue) -> Result<Cue>;

    /// Get all cues of a session, ordered by `time_sec` then insertion order
    async fn get_cues(&self, session_id: SessionId) -> Result<Vec<Cue>>;

    /// Create or replace the stored position for a session
    async fn save_progress(&self, session_id: SessionId, position_secs: i64) -> Result<()>;

    /// Get the stored position for a session
    async fn get_progress(&self, session_id: SessionId) -> Result<Option<PlaybackProgress>>;
}

/// Audio output facility
///
/// Starting playback returns immediately; completion and failure are
/// reported later as `OutputEvent`s on a channel owned by the implementation.
/// At most one playback is active at a time: `play` replaces whatever was
/// running.
#[async_trait]
pub trait AudioOutput: Send + Sync {
    /// Start playing a file
    ///
    /// # Errors
    /// Returns `MindfulError::Playback` if playback could not be started
    async fn play(&self, request: PlayRequest) -> Result<PlaybackId>;

    /// Terminate the active playback, if any
    ///
    /// A playback that ends on its own while being stopped may still report
    /// `Finished`; listeners discard events whose id they no longer track.
    async fn stop(&self) -> Result<()>;

    /// Halt output so it can be resumed later from a known position
    ///
    /// The caller is responsible for tracking the position. Outputs that cannot
    /// hold a suspended stream simply stop.
    async fn suspend(&self) -> Result<()> {
        self.stop().await
    }

    /// Set linear gain in `[0.0, 1.0]`
    async fn set_gain(&self, level: f32) -> Result<()>;
}

/// Media probing facility
#[async_trait]
pub trait MediaProbe: Send + Sync {
    /// Read structural metadata of the file at `path`
    ///
    /// # Errors
    /// Returns `MindfulError::MediaProbe` if the file is missing or unreadable
    async fn probe(&self, path: &Path) -> Result<MediaInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MindfulError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StopCounter {
        stops: Mutex<u32>,
    }

    #[async_trait]
    impl AudioOutput for StopCounter {
        async fn play(&self, _request: PlayRequest) -> Result<PlaybackId> {
            Err(MindfulError::playback("not supported"))
        }

        async fn stop(&self) -> Result<()> {
            *self.stops.lock().unwrap() += 1;
            Ok(())
        }

        async fn set_gain(&self, _level: f32) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn default_suspend_stops_output() {
        let output = StopCounter::default();
        output.suspend().await.unwrap();
        output.suspend().await.unwrap();
        assert_eq!(*output.stops.lock().unwrap(), 2);
    }
}
