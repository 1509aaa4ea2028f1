use crate::{cues, playback_progress, sessions};
use async_trait::async_trait;
use mindful_core::{
    error::Result,
    types::{Cue, NewCue, PlaybackProgress, Session, SessionId},
    SessionStore,
};
use sqlx::SqlitePool;

/// Local storage context using `SQLite`
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SessionStore for LocalStorageContext {
    // Sessions
    async fn ensure_session(&self, session: &Session) -> Result<bool> {
        Ok(sessions::insert_or_ignore(&self.pool, session).await?)
    }

    async fn session_exists(&self, id: SessionId) -> Result<bool> {
        Ok(sessions::exists(&self.pool, id).await?)
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<Session>> {
        Ok(sessions::get_by_id(&self.pool, id).await?)
    }

    async fn list_sessions(&self) -> Result<Vec<Session>> {
        Ok(sessions::get_all(&self.pool).await?)
    }

    // Cues
    async fn add_cue(&self, cue: &NewCue) -> Result<Cue> {
        Ok(cues::create(&self.pool, cue).await?)
    }

    async fn get_cues(&self, session_id: SessionId) -> Result<Vec<Cue>> {
        Ok(cues::get_by_session(&self.pool, session_id).await?)
    }

    // Playback progress
    async fn save_progress(&self, session_id: SessionId, position_secs: i64) -> Result<()> {
        Ok(playback_progress::upsert(&self.pool, session_id, position_secs).await?)
    }

    async fn get_progress(&self, session_id: SessionId) -> Result<Option<PlaybackProgress>> {
        Ok(playback_progress::get(&self.pool, session_id).await?)
    }
}
