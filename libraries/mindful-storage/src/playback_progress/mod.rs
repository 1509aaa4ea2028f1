//! Last known playback position per session

use crate::Result;
use mindful_core::types::{PlaybackProgress, SessionId};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct ProgressRow {
    id: i64,
    session_id: i64,
    last_position: i64,
    updated_at: i64,
}

impl From<ProgressRow> for PlaybackProgress {
    fn from(row: ProgressRow) -> Self {
        Self {
            id: row.id,
            session_id: row.session_id,
            last_position: row.last_position,
            updated_at: row.updated_at,
        }
    }
}

/// Get the stored position for a session
pub async fn get(pool: &SqlitePool, session_id: SessionId) -> Result<Option<PlaybackProgress>> {
    let row = sqlx::query_as::<_, ProgressRow>(
        "SELECT id, session_id, last_position, updated_at
         FROM playback_progress WHERE session_id = ?",
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Into::into))
}

/// Create or update the stored position for a session
pub async fn upsert(pool: &SqlitePool, session_id: SessionId, last_position: i64) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO playback_progress (session_id, last_position, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(session_id)
         DO UPDATE SET
            last_position = excluded.last_position,
            updated_at = excluded.updated_at",
    )
    .bind(session_id)
    .bind(last_position.max(0))
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}
