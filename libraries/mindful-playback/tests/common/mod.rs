//! Shared fixtures for manager tests
//!
//! `Harness::new` wires the manager to a REAL file-based SQLite store.
//! `Harness::in_memory` uses `MemoryStore` instead, for tests that pause the
//! tokio clock (SQLite work happens on threads the paused clock cannot see).

#![allow(dead_code)]

use async_trait::async_trait;
use mindful_core::{
    AudioOutput, Cue, MediaInfo, MediaProbe, MindfulError, NewCue, OutputEvent, PlayRequest,
    PlaybackId, PlaybackProgress, Result, Session, SessionId, SessionStore,
};
use mindful_playback::{AudioSessionManager, ManagerConfig};
use mindful_storage::LocalStorageContext;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

pub const ASSETS_DIR: &str = "/srv/mindful/assets";

// ===== Audio output =====

/// Output that records every call and never makes a sound
#[derive(Default)]
pub struct FakeOutput {
    requests: Mutex<Vec<PlayRequest>>,
    gains: Mutex<Vec<f32>>,
    stops: AtomicU32,
    suspends: AtomicU32,
    next_id: AtomicU64,
    fail_next: AtomicBool,
}

impl FakeOutput {
    /// Make the next `play` call fail
    pub fn fail_next_play(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<PlayRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> PlayRequest {
        self.requests().last().cloned().expect("no play request recorded")
    }

    pub fn gains(&self) -> Vec<f32> {
        self.gains.lock().unwrap().clone()
    }

    pub fn stops(&self) -> u32 {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn suspends(&self) -> u32 {
        self.suspends.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioOutput for FakeOutput {
    async fn play(&self, request: PlayRequest) -> Result<PlaybackId> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(MindfulError::playback("output device unavailable"));
        }
        self.requests.lock().unwrap().push(request);
        Ok(PlaybackId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1))
    }

    async fn stop(&self) -> Result<()> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn suspend(&self) -> Result<()> {
        self.suspends.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn set_gain(&self, level: f32) -> Result<()> {
        self.gains.lock().unwrap().push(level);
        Ok(())
    }
}

// ===== Media probe =====

/// Probe reporting the same duration for every file
pub struct FixedProbe(pub Duration);

#[async_trait]
impl MediaProbe for FixedProbe {
    async fn probe(&self, _path: &Path) -> Result<MediaInfo> {
        Ok(MediaInfo::from_duration(self.0))
    }
}

/// Probe that never answers within any reasonable timeout
pub struct HangingProbe;

#[async_trait]
impl MediaProbe for HangingProbe {
    async fn probe(&self, _path: &Path) -> Result<MediaInfo> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(MediaInfo::from_duration(Duration::ZERO))
    }
}

// ===== Session store =====

/// Session store kept entirely in memory
#[derive(Default)]
pub struct MemoryStore {
    sessions: Mutex<BTreeMap<SessionId, String>>,
    cues: Mutex<Vec<Cue>>,
    progress: Mutex<BTreeMap<SessionId, i64>>,
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn ensure_session(&self, session: &Session) -> Result<bool> {
        let mut sessions = self.sessions.lock().unwrap();
        if sessions.contains_key(&session.id) {
            return Ok(false);
        }
        sessions.insert(session.id, session.name.clone());
        Ok(true)
    }

    async fn session_exists(&self, id: SessionId) -> Result<bool> {
        Ok(self.sessions.lock().unwrap().contains_key(&id))
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<Session>> {
        Ok(self.sessions.lock().unwrap().get(&id).map(|name| Session {
            id,
            name: name.clone(),
        }))
    }

    async fn list_sessions(&self) -> Result<Vec<Session>> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .map(|(id, name)| Session {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn add_cue(&self, cue: &NewCue) -> Result<Cue> {
        let mut cues = self.cues.lock().unwrap();
        let cue = Cue {
            id: cues.len() as i64 + 1,
            session_id: cue.session_id,
            time_sec: cue.time_sec,
            message: cue.message.clone(),
        };
        cues.push(cue.clone());
        Ok(cue)
    }

    async fn get_cues(&self, session_id: SessionId) -> Result<Vec<Cue>> {
        let mut cues: Vec<Cue> = self
            .cues
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.session_id == session_id)
            .cloned()
            .collect();
        cues.sort_by_key(|c| (c.time_sec, c.id));
        Ok(cues)
    }

    async fn save_progress(&self, session_id: SessionId, position_secs: i64) -> Result<()> {
        self.progress
            .lock()
            .unwrap()
            .insert(session_id, position_secs.max(0));
        Ok(())
    }

    async fn get_progress(&self, session_id: SessionId) -> Result<Option<PlaybackProgress>> {
        Ok(self
            .progress
            .lock()
            .unwrap()
            .get(&session_id)
            .map(|last_position| PlaybackProgress {
                id: session_id,
                session_id,
                last_position: *last_position,
                updated_at: 0,
            }))
    }
}

/// Store that fails every call with `Persistence` while switched on
///
/// Delegates to a `MemoryStore` otherwise.
#[derive(Default)]
pub struct FailingStore {
    inner: MemoryStore,
    failing: AtomicBool,
}

impl FailingStore {
    pub fn new() -> Self {
        let store = Self::default();
        store.set_failing(true);
        store
    }

    /// Start out working
    pub fn healthy() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MindfulError::persistence("database is locked"));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FailingStore {
    async fn ensure_session(&self, session: &Session) -> Result<bool> {
        self.check()?;
        self.inner.ensure_session(session).await
    }

    async fn session_exists(&self, id: SessionId) -> Result<bool> {
        self.check()?;
        self.inner.session_exists(id).await
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<Session>> {
        self.check()?;
        self.inner.get_session(id).await
    }

    async fn list_sessions(&self) -> Result<Vec<Session>> {
        self.check()?;
        self.inner.list_sessions().await
    }

    async fn add_cue(&self, cue: &NewCue) -> Result<Cue> {
        self.check()?;
        self.inner.add_cue(cue).await
    }

    async fn get_cues(&self, session_id: SessionId) -> Result<Vec<Cue>> {
        self.check()?;
        self.inner.get_cues(session_id).await
    }

    async fn save_progress(&self, session_id: SessionId, position_secs: i64) -> Result<()> {
        self.check()?;
        self.inner.save_progress(session_id, position_secs).await
    }

    async fn get_progress(&self, session_id: SessionId) -> Result<Option<PlaybackProgress>> {
        self.check()?;
        self.inner.get_progress(session_id).await
    }
}

// ===== Harness =====

pub struct Harness {
    pub manager: AudioSessionManager,
    pub output: Arc<FakeOutput>,
    pub store: Arc<dyn SessionStore>,
    _temp_dir: Option<TempDir>,
}

impl Harness {
    /// Manager backed by a fresh SQLite database
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = mindful_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");
        mindful_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let store: Arc<dyn SessionStore> = Arc::new(LocalStorageContext::new(pool));
        Self::build(store, Arc::new(FixedProbe(Duration::from_secs(300))), Some(temp_dir))
    }

    /// Manager backed by `MemoryStore`
    pub fn in_memory() -> Self {
        Self::with_probe(Arc::new(FixedProbe(Duration::from_secs(300))))
    }

    /// Manager whose store fails every call
    pub fn failing_store() -> Self {
        Self::with_store(Arc::new(FailingStore::new()))
    }

    /// Manager backed by `store`
    pub fn with_store(store: Arc<dyn SessionStore>) -> Self {
        Self::build(store, Arc::new(FixedProbe(Duration::from_secs(300))), None)
    }

    /// Manager backed by `MemoryStore` using `probe`
    pub fn with_probe(probe: Arc<dyn MediaProbe>) -> Self {
        Self::build(Arc::new(MemoryStore::default()), probe, None)
    }

    fn build(
        store: Arc<dyn SessionStore>,
        probe: Arc<dyn MediaProbe>,
        temp_dir: Option<TempDir>,
    ) -> Self {
        let output = Arc::new(FakeOutput::default());
        let config = ManagerConfig {
            assets_dir: PathBuf::from(ASSETS_DIR),
            probe_timeout: Duration::from_secs(5),
        };
        let manager = AudioSessionManager::new(
            Arc::clone(&store),
            Arc::clone(&output) as Arc<dyn AudioOutput>,
            probe,
            config,
        );

        Self {
            manager,
            output,
            store,
            _temp_dir: temp_dir,
        }
    }

    pub fn finished(&self) -> OutputEvent {
        OutputEvent::Finished {
            id: self.manager.active_playback().expect("nothing playing"),
        }
    }
}

pub fn asset(name: &str) -> PathBuf {
    Path::new(ASSETS_DIR).join(name)
}
