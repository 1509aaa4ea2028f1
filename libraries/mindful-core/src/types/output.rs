/// Types exchanged with an audio output facility
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Identifies one invocation of the audio output
///
/// Every call to `AudioOutput::play` yields a fresh id. Completion events carry
/// the id so a listener can discard events from playbacks it already replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaybackId(u64);

impl PlaybackId {
    /// Wrap a raw id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlaybackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Request to start playing a file
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    /// Absolute or working-directory-relative path of the file
    pub path: PathBuf,
    /// Offset to start from
    pub start_at: Duration,
    /// Linear gain in `[0.0, 1.0]`
    pub gain: f32,
}

impl PlayRequest {
    /// Play `path` from the beginning at full gain
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            start_at: Duration::ZERO,
            gain: 1.0,
        }
    }

    /// Start from `offset` instead of the beginning
    #[must_use]
    pub fn starting_at(mut self, offset: Duration) -> Self {
        self.start_at = offset;
        self
    }

    /// Use `gain` for this playback
    #[must_use]
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }
}

/// Asynchronous notifications from the audio output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputEvent {
    /// Playback reached the end of the file
    Finished {
        /// Playback that finished
        id: PlaybackId,
    },

    /// Playback ended with an error
    Failed {
        /// Playback that failed
        id: PlaybackId,
        /// Human-readable reason
        message: String,
    },
}

impl OutputEvent {
    /// Playback this event refers to
    pub fn id(&self) -> PlaybackId {
        match self {
            Self::Finished { id } | Self::Failed { id, .. } => *id,
        }
    }
}
