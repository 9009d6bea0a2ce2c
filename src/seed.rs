//! Fill an empty database from a JSON seed file.

use crate::error::{AppError, ConfigError};
use crate::model::{NewAppearance, NewEpisode, NewGuest};
use crate::service::ShowService;
use serde::Deserialize;
use sqlx::SqlitePool;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub episodes: Vec<NewEpisode>,
    #[serde(default)]
    pub guests: Vec<NewGuest>,
    #[serde(default)]
    pub appearances: Vec<NewAppearance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub episodes: usize,
    pub guests: usize,
    pub appearances: usize,
}

pub async fn load_seed_file(path: &Path) -> Result<SeedData, ConfigError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Seed(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::Seed(format!("{}: {}", path.display(), e)))
}

/// Insert the seed in one transaction, unless episodes already exist.
/// Returns None when the database was left untouched.
pub async fn seed_if_empty(pool: &SqlitePool, data: &SeedData) -> Result<Option<SeedReport>, AppError> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM episodes").fetch_one(pool).await?;
    if existing > 0 {
        tracing::info!(existing, "episodes present, skipping seed");
        return Ok(None);
    }

    let mut tx = pool.begin().await?;
    for e in &data.episodes {
        ShowService::insert_episode(&mut *tx, e).await?;
    }
    for g in &data.guests {
        ShowService::insert_guest(&mut *tx, g).await?;
    }
    for a in &data.appearances {
        ShowService::insert_appearance(&mut *tx, a).await?;
    }
    tx.commit().await?;

    let report = SeedReport {
        episodes: data.episodes.len(),
        guests: data.guests.len(),
        appearances: data.appearances.len(),
    };
    tracing::info!(?report, "database seeded");
    Ok(Some(report))
}
