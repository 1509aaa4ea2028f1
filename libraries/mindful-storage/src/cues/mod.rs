//! Timeline cues attached to sessions

use crate::Result;
use mindful_core::types::{Cue, NewCue, SessionId};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct CueRow {
    id: i64,
    session_id: i64,
    time_sec: i64,
    message: String,
}

impl From<CueRow> for Cue {
    fn from(row: CueRow) -> Self {
        Self {
            id: row.id,
            session_id: row.session_id,
            time_sec: row.time_sec,
            message: row.message,
        }
    }
}

/// Insert a cue
///
/// No checks are made here; callers validate the time offset and the session.
pub async fn create(pool: &SqlitePool, cue: &NewCue) -> Result<Cue> {
    let result = sqlx::query("INSERT INTO cues (session_id, time_sec, message) VALUES (?, ?, ?)")
        .bind(cue.session_id)
        .bind(cue.time_sec)
        .bind(&cue.message)
        .execute(pool)
        .await?;

    Ok(Cue {
        id: result.last_insert_rowid(),
        session_id: cue.session_id,
        time_sec: cue.time_sec,
        message: cue.message.clone(),
    })
}

/// Get every cue of a session in timeline order
///
/// Cues sharing a `time_sec` come back in insertion order.
pub async fn get_by_session(pool: &SqlitePool, session_id: SessionId) -> Result<Vec<Cue>> {
    let rows = sqlx::query_as::<_, CueRow>(
        "SELECT id, session_id, time_sec, message
         FROM cues
         WHERE session_id = ?
         ORDER BY time_sec ASC, id ASC",
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}
