//! Core types for session playback

use mindful_core::SessionId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Playback status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    /// No track loaded
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Suspended mid-track
    Paused,

    /// Reached the end of a non-looping track
    Finished,
}

/// In-memory playback state
///
/// One per manager. Mutated only through `AudioSessionManager`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Asset name of the loaded track
    pub current_file: Option<String>,

    /// Resolved path of the loaded track
    pub current_path: Option<PathBuf>,

    pub status: PlaybackStatus,

    /// Restart the track when it finishes
    pub looping: bool,

    /// Linear volume in `[0.0, 1.0]`
    pub volume: f32,
}

impl PlaybackState {
    /// Whether audio is (believed to be) playing
    ///
    /// Always false with no track loaded.
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing && self.current_path.is_some()
    }

    /// Whether a track is loaded, in any status
    pub fn is_loaded(&self) -> bool {
        self.current_path.is_some()
    }

    pub(crate) fn clear_track(&mut self) {
        self.current_file = None;
        self.current_path = None;
        self.looping = false;
        self.status = PlaybackStatus::Stopped;
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_file: None,
            current_path: None,
            status: PlaybackStatus::Stopped,
            looping: false,
            volume: 1.0,
        }
    }
}

/// Serializable view of the manager, for status endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub current_file: Option<String>,
    pub status: PlaybackStatus,
    pub is_playing: bool,
    pub looping: bool,
    pub volume: f32,
    /// Seconds into the loaded track
    pub position_secs: f64,
    pub active_session: Option<SessionId>,
}

/// Manager configuration
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Directory asset names are resolved against
    pub assets_dir: PathBuf,

    /// Upper bound on a single media probe
    pub probe_timeout: Duration,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("./assets"),
            probe_timeout: Duration::from_secs(5),
        }
    }
}
