//! Database creation and connection pooling.

use crate::error::{AppError, ConfigError};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://lateshow.db";

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Create the SQLite file behind `database_url` when it does not exist yet.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    if is_in_memory(database_url) {
        return Ok(());
    }
    if !Sqlite::database_exists(database_url).await? {
        tracing::info!(url = %database_url, "creating database");
        Sqlite::create_database(database_url).await?;
    }
    Ok(())
}

/// Open a pool with foreign key enforcement on every connection.
/// In-memory databases are pinned to a single, never-recycled connection.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| ConfigError::Invalid {
            key: "DATABASE_URL",
            value: database_url.to_string(),
            reason: e.to_string(),
        })?
        .foreign_keys(true);
    let pool = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(opts)
            .await?
    };
    Ok(pool)
}

/// Fresh in-memory database with the schema applied.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let pool = connect("sqlite::memory:", 1).await?;
    crate::migration::apply_migrations(&pool).await?;
    Ok(pool)
}
