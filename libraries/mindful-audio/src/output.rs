//! Process-backed audio output
//!
//! Each playback is one child process of a command-line player. Stopping a
//! playback kills its process; natural exit is reported as an `OutputEvent`.

use crate::error::AudioError;
use async_trait::async_trait;
use mindful_core::{AudioOutput, MindfulError, OutputEvent, PlayRequest, PlaybackId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};

/// Receiving half of the output event channel
pub type OutputEvents = mpsc::UnboundedReceiver<OutputEvent>;

/// Player command configuration
///
/// `args` may contain the placeholders `{path}`, `{start}` (seconds, three
/// decimals), `{volume}` (0-100) and `{gain}` (0.0-1.0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutputConfig {
    /// Player executable
    pub program: PathBuf,
    /// Argument template
    pub args: Vec<String>,
}

impl CommandOutputConfig {
    /// Arguments for `ffplay` playing one file without a window
    pub fn ffplay_args() -> Vec<String> {
        [
            "-nodisp",
            "-autoexit",
            "-loglevel",
            "error",
            "-ss",
            "{start}",
            "-volume",
            "{volume}",
            "{path}",
        ]
        .iter()
        .map(ToString::to_string)
        .collect()
    }

    fn expand_args(&self, request: &PlayRequest) -> Vec<String> {
        let gain = request.gain.clamp(0.0, 1.0);
        let volume = (gain * 100.0).round() as u32;
        let path = request.path.to_string_lossy();
        let start = format!("{:.3}", request.start_at.as_secs_f64());

        self.args
            .iter()
            .map(|arg| {
                arg.replace("{path}", &path)
                    .replace("{start}", &start)
                    .replace("{volume}", &volume.to_string())
                    .replace("{gain}", &format!("{gain:.2}"))
            })
            .collect()
    }
}

impl Default for CommandOutputConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffplay"),
            args: Self::ffplay_args(),
        }
    }
}

struct ActivePlayback {
    id: PlaybackId,
    cancel: oneshot::Sender<()>,
}

/// Audio output that shells out to a command-line player
pub struct CommandOutput {
    config: CommandOutputConfig,
    events: mpsc::UnboundedSender<OutputEvent>,
    next_id: AtomicU64,
    active: Arc<Mutex<Option<ActivePlayback>>>,
    gain: Mutex<f32>,
}

impl CommandOutput {
    /// Create an output and the channel its events arrive on
    pub fn new(config: CommandOutputConfig) -> (Self, OutputEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        let output = Self {
            config,
            events: tx,
            next_id: AtomicU64::new(1),
            active: Arc::new(Mutex::new(None)),
            gain: Mutex::new(1.0),
        };
        (output, rx)
    }

    /// Gain that will be used for the next playback started without an explicit one
    pub fn gain(&self) -> f32 {
        *self.gain.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Id of the playback currently running, if any
    pub fn active_playback(&self) -> Option<PlaybackId> {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|active| active.id)
    }

    fn spawn_player(&self, request: &PlayRequest) -> Result<Child, AudioError> {
        let args = self.config.expand_args(request);
        tracing::debug!(program = %self.config.program.display(), ?args, "Spawning player");

        Command::new(&self.config.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| AudioError::Spawn {
                program: self.config.program.display().to_string(),
                source,
            })
    }

    fn cancel_active(&self) -> Option<PlaybackId> {
        let previous = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        previous.map(|active| {
            // The watcher may already have exited; nothing to cancel then
            let _ = active.cancel.send(());
            active.id
        })
    }
}

#[async_trait]
impl AudioOutput for CommandOutput {
    async fn play(&self, request: PlayRequest) -> mindful_core::Result<PlaybackId> {
        if !request.path.exists() {
            return Err(MindfulError::playback(format!(
                "audio file not found: {}",
                request.path.display()
            )));
        }

        let mut child = self.spawn_player(&request)?;

        if let Some(previous) = self.cancel_active() {
            tracing::debug!(%previous, "Replacing active playback");
        }

        let id = PlaybackId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (cancel_tx, cancel_rx) = oneshot::channel();
        *self.active.lock().unwrap_or_else(PoisonError::into_inner) = Some(ActivePlayback {
            id,
            cancel: cancel_tx,
        });
        *self.gain.lock().unwrap_or_else(PoisonError::into_inner) = request.gain;

        tracing::info!(%id, path = %request.path.display(), "Playback started");

        let stderr = child.stderr.take();
        let events = self.events.clone();
        let active = Arc::clone(&self.active);

        tokio::spawn(async move {
            let stderr_task = tokio::spawn(async move {
                let mut buf = String::new();
                if let Some(mut stderr) = stderr {
                    let _ = stderr.read_to_string(&mut buf).await;
                }
                buf
            });

            tokio::select! {
                status = child.wait() => {
                    {
                        let mut guard = active.lock().unwrap_or_else(PoisonError::into_inner);
                        if guard.as_ref().is_some_and(|a| a.id == id) {
                            guard.take();
                        }
                    }

                    let stderr = stderr_task.await.unwrap_or_default();
                    let event = match status {
                        Ok(status) if status.success() => OutputEvent::Finished { id },
                        Ok(status) => OutputEvent::Failed {
                            id,
                            message: format!("player exited with {status}: {}", stderr.trim()),
                        },
                        Err(e) => OutputEvent::Failed {
                            id,
                            message: format!("failed to wait for player: {e}"),
                        },
                    };

                    tracing::debug!(?event, "Player exited");
                    // Receiver gone means nobody is listening any more
                    let _ = events.send(event);
                }
                _ = cancel_rx => {
                    if let Err(e) = child.kill().await {
                        tracing::warn!(%id, "Failed to kill player: {}", e);
                    }
                    stderr_task.abort();
                    tracing::debug!(%id, "Playback cancelled");
                }
            }
        });

        Ok(id)
    }

    async fn stop(&self) -> mindful_core::Result<()> {
        if let Some(id) = self.cancel_active() {
            tracing::info!(%id, "Playback stopped");
        }
        Ok(())
    }

    async fn set_gain(&self, level: f32) -> mindful_core::Result<()> {
        let level = level.clamp(0.0, 1.0);
        *self.gain.lock().unwrap_or_else(PoisonError::into_inner) = level;

        // A running player keeps its start volume; the new gain applies to the next start
        tracing::debug!(level, "Output gain updated");
        Ok(())
    }
}
