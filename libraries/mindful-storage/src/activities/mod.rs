//! Mindfulness activities
//!
//! Plain CRUD backing the `/activities` REST routes.

use crate::Result;
use mindful_core::types::{Activity, ActivityId, NewActivity};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: i64,
    name: String,
    description: Option<String>,
    mood: Option<String>,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            mood: row.mood,
        }
    }
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Activity>> {
    let rows = sqlx::query_as::<_, ActivityRow>(
        "SELECT id, name, description, mood FROM activities ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: ActivityId) -> Result<Option<Activity>> {
    let row = sqlx::query_as::<_, ActivityRow>(
        "SELECT id, name, description, mood FROM activities WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Into::into))
}

/// Insert an activity and return its id
pub async fn create(pool: &SqlitePool, activity: &NewActivity) -> Result<ActivityId> {
    let result = sqlx::query("INSERT INTO activities (name, description, mood) VALUES (?, ?, ?)")
        .bind(&activity.name)
        .bind(&activity.description)
        .bind(&activity.mood)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Replace every field of an activity
///
/// Returns the number of rows changed (0 if the id does not exist).
pub async fn update(pool: &SqlitePool, id: ActivityId, activity: &NewActivity) -> Result<u64> {
    let result =
        sqlx::query("UPDATE activities SET name = ?, description = ?, mood = ? WHERE id = ?")
            .bind(&activity.name)
            .bind(&activity.description)
            .bind(&activity.mood)
            .bind(id)
            .execute(pool)
            .await?;

    Ok(result.rows_affected())
}

/// Delete an activity, returning the number of rows removed
pub async fn delete(pool: &SqlitePool, id: ActivityId) -> Result<u64> {
    let result = sqlx::query("DELETE FROM activities WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
