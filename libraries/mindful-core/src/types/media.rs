/// Structural metadata returned by a media probe
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Properties of an audio asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Total track duration
    pub duration: Duration,
    /// Sample rate in Hz, if known
    pub sample_rate: Option<u32>,
    /// Channel count, if known
    pub channels: Option<u8>,
    /// Overall bitrate in kbps, if known
    pub bitrate: Option<u32>,
}

impl MediaInfo {
    /// Create media info carrying only a duration
    pub fn from_duration(duration: Duration) -> Self {
        Self {
            duration,
            sample_rate: None,
            channels: None,
            bitrate: None,
        }
    }

    /// Duration as fractional seconds
    pub fn duration_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}
