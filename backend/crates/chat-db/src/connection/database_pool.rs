use crate::{DbError, Result};

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use error_location::ErrorLocation;
use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

/// Where the message table lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// Private in-memory database, gone when the pool closes
    InMemory,
    /// SQLite file, created if missing
    File(PathBuf),
}

/// Open a pool for the given target. Does not run migrations.
pub async fn connect(target: &DatabaseTarget) -> Result<SqlitePool> {
    match target {
        DatabaseTarget::InMemory => connect_in_memory().await,
        DatabaseTarget::File(path) => connect_file(path).await,
    }
}

/// Apply the embedded migrations (creates the `message` table when absent)
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DbError::Migration {
            message: format!("Migration failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    debug!("Database migrations applied");
    Ok(())
}

/// Round-trip a trivial query, used by the health endpoint
pub async fn ping(pool: &SqlitePool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

async fn connect_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new().filename(":memory:");

    // Every in-memory connection is its own database, so the pool must keep
    // exactly one connection alive for the whole process lifetime.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    info!("Opened in-memory database");
    Ok(pool)
}

async fn connect_file(path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DbError::Initialization {
                message: format!("Failed to create database directory: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    info!("Opened database file {}", path.display());
    Ok(pool)
}
