//! Mindful Audio Storage
//!
//! `SQLite` database layer for the mindfulness audio backend.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each table owns its own module of queries
//!   (`sessions`, `cues`, `playback_progress`, `activities`)
//! - **Embedded Migrations**: The schema ships inside the binary
//! - **Trait Boundary**: `LocalStorageContext` implements
//!   `mindful_core::SessionStore` for the session manager
//!
//! # Example
//!
//! ```rust,no_run
//! use mindful_storage::{LocalStorageContext, create_pool, run_migrations};
//! use mindful_core::SessionStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://mindfulness.db").await?;
//! run_migrations(&pool).await?;
//!
//! let storage = LocalStorageContext::new(pool);
//! let cues = storage.get_cues(1).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod activities;
pub mod cues;
pub mod playback_progress;
pub mod sessions;

pub use context::LocalStorageContext;
pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://mindfulness.db`)
///
/// In-memory databases (`sqlite::memory:`) are limited to a single connection,
/// since every connection would otherwise see its own empty database.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let in_memory = database_url.contains(":memory:");

    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);

        // Create parent directory if it doesn't exist
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let mut pool_options = SqlitePoolOptions::new().max_connections(5);
    if in_memory {
        // Dropping the last connection drops the database
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options.connect_with(options).await?;

    tracing::info!(database_url, "SQLite pool ready");

    Ok(pool)
}
