//! Listening sessions
//!
//! Sessions are created insert-or-ignore and never updated or deleted.

use crate::Result;
use mindful_core::types::{Session, SessionId};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i64,
    session_name: String,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            id: row.id,
            name: row.session_name,
        }
    }
}

/// Insert a session unless one with the same id already exists
///
/// Returns `true` if a row was created. An existing row keeps its name.
pub async fn insert_or_ignore(pool: &SqlitePool, session: &Session) -> Result<bool> {
    let result = sqlx::query("INSERT OR IGNORE INTO sessions (id, session_name) VALUES (?, ?)")
        .bind(session.id)
        .bind(&session.name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_by_id(pool: &SqlitePool, id: SessionId) -> Result<Option<Session>> {
    let row = sqlx::query_as::<_, SessionRow>(
        "SELECT id, session_name FROM sessions WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Into::into))
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Session>> {
    let rows = sqlx::query_as::<_, SessionRow>("SELECT id, session_name FROM sessions ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn exists(pool: &SqlitePool, id: SessionId) -> Result<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM sessions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}
