//! Schema creation for episodes, guests and appearances.
//! Foreign keys are named `fk_<table>_<column>_<referred_table>`.

use crate::error::AppError;
use sqlx::SqlitePool;

pub const TABLES: &[&str] = &["episodes", "guests", "appearances"];

fn fk_name(table: &str, column: &str, referred_table: &str) -> String {
    format!("fk_{}_{}_{}", table, column, referred_table)
}

fn ddl() -> Vec<String> {
    vec![
        r#"
        CREATE TABLE IF NOT EXISTS episodes (
            id INTEGER PRIMARY KEY,
            date TEXT,
            number INTEGER
        )
        "#
        .to_string(),
        r#"
        CREATE TABLE IF NOT EXISTS guests (
            id INTEGER PRIMARY KEY,
            name TEXT,
            occupation TEXT NOT NULL
        )
        "#
        .to_string(),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS appearances (
                id INTEGER PRIMARY KEY,
                rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
                episode_id INTEGER NOT NULL,
                guest_id INTEGER NOT NULL,
                CONSTRAINT {} FOREIGN KEY (episode_id) REFERENCES episodes (id) ON DELETE CASCADE,
                CONSTRAINT {} FOREIGN KEY (guest_id) REFERENCES guests (id) ON DELETE CASCADE
            )
            "#,
            fk_name("appearances", "episode_id", "episodes"),
            fk_name("appearances", "guest_id", "guests"),
        ),
        "CREATE INDEX IF NOT EXISTS ix_appearances_episode_id ON appearances (episode_id)".to_string(),
        "CREATE INDEX IF NOT EXISTS ix_appearances_guest_id ON appearances (guest_id)".to_string(),
    ]
}

/// Create the three tables if missing. Safe to run on every start.
pub async fn apply_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    for sql in ddl() {
        tracing::debug!(sql = %sql.trim(), "migration");
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!(tables = ?TABLES, "schema ready");
    Ok(())
}
