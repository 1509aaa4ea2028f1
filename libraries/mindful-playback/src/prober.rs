//! Asset probing with a bounded timeout

use crate::assets::AssetLibrary;
use mindful_core::{MediaInfo, MediaProbe, MindfulError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Resolves asset names and probes them
///
/// Cheap to clone and independent of playback state, so callers can probe
/// without holding the manager.
#[derive(Clone)]
pub struct AssetProber {
    assets: AssetLibrary,
    probe: Arc<dyn MediaProbe>,
    timeout: Duration,
}

impl AssetProber {
    pub fn new(assets: AssetLibrary, probe: Arc<dyn MediaProbe>, timeout: Duration) -> Self {
        Self {
            assets,
            probe,
            timeout,
        }
    }

    pub fn assets(&self) -> &AssetLibrary {
        &self.assets
    }

    /// Duration of an asset in seconds
    pub async fn fetch_duration(&self, file: &str) -> Result<f64> {
        Ok(self.probe(file).await?.duration_secs())
    }

    /// Probe an asset
    ///
    /// Invalid names are `Validation`. Every probe failure, including the
    /// timeout, is `MediaProbe`.
    pub async fn probe(&self, file: &str) -> Result<MediaInfo> {
        let path = self.assets.resolve(file)?;

        match tokio::time::timeout(self.timeout, self.probe.probe(&path)).await {
            Ok(Ok(info)) => Ok(info),
            Ok(Err(MindfulError::MediaProbe(msg))) => Err(MindfulError::MediaProbe(msg)),
            Ok(Err(e)) => Err(MindfulError::media_probe(format!("{file}: {e}"))),
            Err(_) => {
                tracing::warn!(file, timeout = ?self.timeout, "Media probe timed out");
                Err(MindfulError::media_probe(format!(
                    "probing {file} timed out after {:?}",
                    self.timeout
                )))
            }
        }
    }
}
