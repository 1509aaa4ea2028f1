//! Audio session manager - core orchestration
//!
//! Coordinates the session store, the audio output and the media probe
//! around a single in-memory `PlaybackState`.

use crate::{
    assets::AssetLibrary,
    clock::PositionClock,
    prober::AssetProber,
    types::{ManagerConfig, PlaybackSnapshot, PlaybackState, PlaybackStatus},
    volume::clamp_volume,
};
use mindful_core::{
    AudioOutput, Cue, MediaInfo, MediaProbe, MindfulError, NewCue, OutputEvent, PlayRequest,
    PlaybackId, PlaybackProgress, Result, Session, SessionId, SessionStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Audio session manager
///
/// Owns the playback state of one process. All methods take `&mut self`;
/// callers sharing a manager across tasks wrap it in a `tokio::sync::Mutex`.
///
/// State changes are optimistic: `play` marks the track as playing before
/// the output confirms and rolls back to `Stopped` if starting fails.
pub struct AudioSessionManager {
    store: Arc<dyn SessionStore>,
    output: Arc<dyn AudioOutput>,
    prober: AssetProber,

    state: PlaybackState,

    /// Playback whose events are still relevant
    active_playback: Option<PlaybackId>,

    /// Session that progress checkpoints are written for
    active_session: Option<SessionId>,

    clock: PositionClock,
}

impl AudioSessionManager {
    /// Create a manager with nothing loaded at full volume
    pub fn new(
        store: Arc<dyn SessionStore>,
        output: Arc<dyn AudioOutput>,
        probe: Arc<dyn MediaProbe>,
        config: ManagerConfig,
    ) -> Self {
        Self {
            store,
            output,
            prober: AssetProber::new(
                AssetLibrary::new(config.assets_dir),
                probe,
                config.probe_timeout,
            ),
            state: PlaybackState::default(),
            active_playback: None,
            active_session: None,
            clock: PositionClock::default(),
        }
    }

    // ===== State =====

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn active_session(&self) -> Option<SessionId> {
        self.active_session
    }

    /// Playback whose completion the manager is waiting for
    pub fn active_playback(&self) -> Option<PlaybackId> {
        self.active_playback
    }

    /// Position in the loaded track
    pub fn position(&self) -> Duration {
        self.clock.position()
    }

    pub fn assets(&self) -> &AssetLibrary {
        self.prober.assets()
    }

    /// Handle for probing assets without borrowing the manager
    pub fn prober(&self) -> AssetProber {
        self.prober.clone()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current_file: self.state.current_file.clone(),
            status: self.state.status,
            is_playing: self.state.is_playing(),
            looping: self.state.looping,
            volume: self.state.volume,
            position_secs: self.clock.position().as_secs_f64(),
            active_session: self.active_session,
        }
    }

    // ===== Sessions =====

    /// Create the session row if missing and make it the active session
    ///
    /// An existing row keeps its name. Returns `true` if a row was created.
    pub async fn initialize_session(&mut self, session_id: SessionId) -> Result<bool> {
        let created = self
            .store
            .ensure_session(&Session::with_default_name(session_id))
            .await?;

        if created {
            tracing::info!(session_id, "Session created");
        } else {
            tracing::debug!(session_id, "Session already exists");
        }

        self.active_session = Some(session_id);
        Ok(created)
    }

    // ===== Playback control =====

    /// Start playing an asset from the beginning
    ///
    /// A track that is already loaded has its position checkpointed first.
    pub async fn play(&mut self, file: &str, looping: bool) -> Result<()> {
        let path = self.prober.assets().resolve(file)?;
        self.checkpoint_loaded_track().await?;
        self.start(file.to_string(), path, looping, Duration::ZERO)
            .await
    }

    /// Suspend playback, remembering the position
    ///
    /// No-op unless playing.
    pub async fn pause(&mut self) -> Result<()> {
        if !self.state.is_playing() {
            tracing::debug!(status = ?self.state.status, "Pause ignored");
            return Ok(());
        }

        self.output.suspend().await?;

        let position = self.clock.pause();
        // The suspended playback may still report completion
        self.active_playback = None;
        self.state.status = PlaybackStatus::Paused;

        tracing::info!(position_secs = position.as_secs(), "Playback paused");
        self.checkpoint_progress().await
    }

    /// Continue the loaded track from the recorded position
    ///
    /// A finished track starts over from the beginning.
    ///
    /// # Errors
    /// `InvalidState` if no track is loaded
    pub async fn resume(&mut self) -> Result<()> {
        let (Some(file), Some(path)) = (
            self.state.current_file.clone(),
            self.state.current_path.clone(),
        ) else {
            return Err(MindfulError::invalid_state("nothing to resume: no track loaded"));
        };

        if self.state.is_playing() {
            tracing::debug!("Resume ignored, already playing");
            return Ok(());
        }

        let offset = match self.state.status {
            PlaybackStatus::Finished => Duration::ZERO,
            _ => self.clock.position(),
        };

        self.start(file, path, self.state.looping, offset).await
    }

    /// Stop playback and unload the track
    ///
    /// The position is checkpointed before the track is cleared. No-op when
    /// nothing is loaded.
    pub async fn stop(&mut self) -> Result<()> {
        if !self.state.is_loaded() {
            tracing::debug!("Stop ignored, nothing loaded");
            return Ok(());
        }

        let position = self.clock.pause();
        let stopped = self.output.stop().await;

        self.state.clear_track();
        self.active_playback = None;
        self.clock.reset_to(Duration::ZERO);

        tracing::info!(position_secs = position.as_secs(), "Playback stopped");
        self.save_position(position).await?;

        stopped
    }

    /// Set volume, clamped to `[0.0, 1.0]`
    ///
    /// Returns the level actually applied.
    pub async fn set_volume(&mut self, level: f32) -> Result<f32> {
        let clamped = clamp_volume(level);
        self.state.volume = clamped;
        self.output.set_gain(clamped).await?;

        tracing::debug!(requested = level, applied = clamped, "Volume set");
        Ok(clamped)
    }

    /// Start playing `file` at the stored progress of `session_id`
    ///
    /// The session becomes the active session.
    pub async fn resume_session(
        &mut self,
        session_id: SessionId,
        file: &str,
        looping: bool,
    ) -> Result<Duration> {
        let path = self.prober.assets().resolve(file)?;

        if !self.store.session_exists(session_id).await? {
            return Err(MindfulError::not_found("session", session_id));
        }

        // Progress of the outgoing track belongs to the outgoing session
        self.checkpoint_loaded_track().await?;

        let offset = self
            .store
            .get_progress(session_id)
            .await?
            .map_or(Duration::ZERO, |p| {
                Duration::from_secs(u64::try_from(p.last_position).unwrap_or(0))
            });

        self.active_session = Some(session_id);
        self.start(file.to_string(), path, looping, offset).await?;

        tracing::info!(session_id, offset_secs = offset.as_secs(), "Session resumed");
        Ok(offset)
    }

    // ===== Output events =====

    /// Apply an event reported by the audio output
    ///
    /// Events from playbacks that were replaced, paused or stopped are
    /// ignored. A failure event rolls the state back to `Stopped` and is
    /// returned as a `Playback` error.
    pub async fn handle_output_event(&mut self, event: OutputEvent) -> Result<()> {
        if self.active_playback != Some(event.id()) {
            tracing::debug!(id = %event.id(), "Ignoring stale output event");
            return Ok(());
        }
        self.active_playback = None;

        match event {
            OutputEvent::Finished { .. } => self.on_finished().await,
            OutputEvent::Failed { id, message } => {
                tracing::warn!(%id, "Playback failed: {}", message);
                self.state.clear_track();
                self.clock.reset_to(Duration::ZERO);
                Err(MindfulError::playback(message))
            }
        }
    }

    async fn on_finished(&mut self) -> Result<()> {
        if self.state.looping {
            if let (Some(file), Some(path)) = (
                self.state.current_file.clone(),
                self.state.current_path.clone(),
            ) {
                tracing::debug!(file = %file, "Looping track");
                return self.start(file, path, true, Duration::ZERO).await;
            }
        }

        self.state.status = PlaybackStatus::Finished;
        self.clock.reset_to(Duration::ZERO);
        tracing::info!(file = ?self.state.current_file, "Playback finished");

        self.checkpoint_progress().await
    }

    // ===== Progress =====

    /// Persist the current position for the active session
    ///
    /// No-op without an active session.
    pub async fn checkpoint_progress(&mut self) -> Result<()> {
        let position = self.clock.position();
        self.save_position(position).await
    }

    async fn checkpoint_loaded_track(&mut self) -> Result<()> {
        // A finished track already stored its reset position
        if !self.state.is_loaded() || self.state.status == PlaybackStatus::Finished {
            return Ok(());
        }

        let position = self.clock.pause();
        self.save_position(position).await
    }

    pub async fn get_progress(&self, session_id: SessionId) -> Result<Option<PlaybackProgress>> {
        self.store.get_progress(session_id).await
    }

    async fn save_position(&self, position: Duration) -> Result<()> {
        let Some(session_id) = self.active_session else {
            return Ok(());
        };

        let secs = i64::try_from(position.as_secs()).unwrap_or(i64::MAX);
        self.store.save_progress(session_id, secs).await?;

        tracing::debug!(session_id, position_secs = secs, "Progress saved");
        Ok(())
    }

    // ===== Cues =====

    /// Add a cue to an existing session
    ///
    /// # Errors
    /// `Validation` if `time_sec` is negative or the session does not exist
    pub async fn add_cue(
        &self,
        session_id: SessionId,
        time_sec: i64,
        message: impl Into<String>,
    ) -> Result<Cue> {
        let cue = NewCue::new(session_id, time_sec, message);
        cue.validate()?;

        if !self.store.session_exists(session_id).await? {
            return Err(MindfulError::validation(format!(
                "session {session_id} does not exist"
            )));
        }

        let cue = self.store.add_cue(&cue).await?;
        tracing::debug!(session_id, cue_id = cue.id, time_sec, "Cue added");
        Ok(cue)
    }

    /// Cues of a session in chronological order
    pub async fn get_cues(&self, session_id: SessionId) -> Result<Vec<Cue>> {
        self.store.get_cues(session_id).await
    }

    // ===== Media =====

    /// Duration of an asset in seconds
    pub async fn fetch_duration(&self, file: &str) -> Result<f64> {
        self.prober.fetch_duration(file).await
    }

    /// Probe an asset with a bounded timeout
    pub async fn probe(&self, file: &str) -> Result<MediaInfo> {
        self.prober.probe(file).await
    }

    // ===== Internals =====

    async fn start(
        &mut self,
        file: String,
        path: PathBuf,
        looping: bool,
        offset: Duration,
    ) -> Result<()> {
        // Optimistic: state reflects the request before the output confirms
        self.state.current_file = Some(file);
        self.state.current_path = Some(path.clone());
        self.state.looping = looping;
        self.state.status = PlaybackStatus::Playing;
        self.clock.reset_to(offset);
        self.clock.start();

        let request = PlayRequest::new(path)
            .starting_at(offset)
            .with_gain(self.state.volume);

        match self.output.play(request).await {
            Ok(id) => {
                self.active_playback = Some(id);
                tracing::info!(
                    %id,
                    file = ?self.state.current_file,
                    looping,
                    offset_secs = offset.as_secs(),
                    "Playback started"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(file = ?self.state.current_file, "Failed to start playback: {}", e);
                self.state.clear_track();
                self.active_playback = None;
                self.clock.reset_to(Duration::ZERO);

                // Whatever was playing before must not outlive the rollback
                if let Err(stop_err) = self.output.stop().await {
                    tracing::warn!("Failed to stop output after rollback: {}", stop_err);
                }

                Err(match e {
                    MindfulError::Playback(_) => e,
                    other => MindfulError::playback(other.to_string()),
                })
            }
        }
    }
}
