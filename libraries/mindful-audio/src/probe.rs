//! Media probes
//!
//! [`LoftyProbe`] reads properties in-process. [`FfprobeProbe`] asks the
//! `ffprobe` binary, which understands more containers at the cost of a
//! process spawn.

use crate::error::{AudioError, Result};
use async_trait::async_trait;
use lofty::AudioFile;
use mindful_core::{MediaInfo, MediaProbe};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Media probe using the lofty library
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyProbe;

impl LoftyProbe {
    /// Create a new probe
    pub fn new() -> Self {
        Self
    }

    /// Read properties synchronously
    pub fn read(path: &Path) -> Result<MediaInfo> {
        if !path.exists() {
            return Err(AudioError::FileNotFound(path.display().to_string()));
        }

        let tagged_file = lofty::read_from_path(path)?;
        let properties = tagged_file.properties();

        Ok(MediaInfo {
            duration: properties.duration(),
            sample_rate: properties.sample_rate(),
            channels: properties.channels(),
            bitrate: properties.overall_bitrate(),
        })
    }
}

#[async_trait]
impl MediaProbe for LoftyProbe {
    async fn probe(&self, path: &Path) -> mindful_core::Result<MediaInfo> {
        let path = path.to_path_buf();
        let info = tokio::task::spawn_blocking(move || Self::read(&path))
            .await
            .map_err(AudioError::from)??;

        tracing::debug!(duration_secs = info.duration_secs(), "Probed media with lofty");
        Ok(info)
    }
}

/// Media probe shelling out to `ffprobe`
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    ffprobe_path: PathBuf,
}

impl FfprobeProbe {
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }

    async fn run(&self, path: &Path) -> Result<MediaInfo> {
        if !path.exists() {
            return Err(AudioError::FileNotFound(path.display().to_string()));
        }

        let output = Command::new(&self.ffprobe_path)
            .arg("-v")
            .arg("quiet")
            .arg("-print_format")
            .arg("json")
            .arg("-show_format")
            .arg("-show_streams")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AudioError::Probe(format!("ffprobe failed: {}", stderr.trim())));
        }

        parse_ffprobe_json(&output.stdout)
    }
}

impl Default for FfprobeProbe {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

#[async_trait]
impl MediaProbe for FfprobeProbe {
    async fn probe(&self, path: &Path) -> mindful_core::Result<MediaInfo> {
        Ok(self.run(path).await?)
    }
}

/// Extract media info from `ffprobe -print_format json -show_format -show_streams`
fn parse_ffprobe_json(stdout: &[u8]) -> Result<MediaInfo> {
    let probe_data: serde_json::Value = serde_json::from_slice(stdout)
        .map_err(|e| AudioError::Probe(format!("Failed to parse ffprobe output: {e}")))?;

    // ffprobe reports numbers as strings
    let duration_secs = probe_data["format"]["duration"]
        .as_str()
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| AudioError::Probe("ffprobe output has no duration".to_string()))?;

    let audio_stream = probe_data["streams"]
        .as_array()
        .and_then(|streams| streams.iter().find(|s| s["codec_type"] == "audio"));

    let sample_rate = audio_stream
        .and_then(|s| s["sample_rate"].as_str())
        .and_then(|r| r.parse().ok());
    let channels = audio_stream
        .and_then(|s| s["channels"].as_u64())
        .and_then(|c| u8::try_from(c).ok());
    let bitrate = probe_data["format"]["bit_rate"]
        .as_str()
        .and_then(|b| b.parse::<u32>().ok())
        .map(|bps| bps / 1000);

    Ok(MediaInfo {
        duration: Duration::from_secs_f64(duration_secs),
        sample_rate,
        channels,
        bitrate,
    })
}
