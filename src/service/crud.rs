//! Queries and writes against episodes, guests and appearances.

use crate::error::AppError;
use crate::model::{Appearance, AppearanceWithGuest, Episode, Guest, NewAppearance, NewEpisode, NewGuest};
use sqlx::{Executor, Sqlite, SqlitePool};

const SELECT_EPISODE: &str = "SELECT id, date, number FROM episodes";
const SELECT_GUEST: &str = "SELECT id, name, occupation FROM guests";

pub struct ShowService;

impl ShowService {
    /// All episodes in storage order.
    pub async fn list_episodes(pool: &SqlitePool) -> Result<Vec<Episode>, AppError> {
        let sql = format!("{} ORDER BY id", SELECT_EPISODE);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Episode>(&sql).fetch_all(pool).await?)
    }

    pub async fn find_episode(pool: &SqlitePool, id: i64) -> Result<Option<Episode>, AppError> {
        let sql = format!("{} WHERE id = ?", SELECT_EPISODE);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Episode>(&sql).bind(id).fetch_optional(pool).await?)
    }

    /// Appearances of one episode, each joined with its guest, in creation order.
    pub async fn appearances_for_episode(
        pool: &SqlitePool,
        episode_id: i64,
    ) -> Result<Vec<AppearanceWithGuest>, AppError> {
        let sql = r#"
            SELECT a.id, a.rating, a.episode_id, a.guest_id,
                   g.name AS guest_name, g.occupation AS guest_occupation
            FROM appearances a
            JOIN guests g ON g.id = a.guest_id
            WHERE a.episode_id = ?
            ORDER BY a.id
        "#;
        tracing::debug!(sql = %sql.trim(), episode_id, "query");
        Ok(sqlx::query_as::<_, AppearanceWithGuest>(sql)
            .bind(episode_id)
            .fetch_all(pool)
            .await?)
    }

    /// Episode plus its appearances, or None when the id names no episode.
    pub async fn episode_detail(
        pool: &SqlitePool,
        id: i64,
    ) -> Result<Option<(Episode, Vec<AppearanceWithGuest>)>, AppError> {
        let Some(episode) = Self::find_episode(pool, id).await? else {
            return Ok(None);
        };
        let appearances = Self::appearances_for_episode(pool, id).await?;
        Ok(Some((episode, appearances)))
    }

    pub async fn list_guests(pool: &SqlitePool) -> Result<Vec<Guest>, AppError> {
        let sql = format!("{} ORDER BY id", SELECT_GUEST);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Guest>(&sql).fetch_all(pool).await?)
    }

    pub async fn find_guest(pool: &SqlitePool, id: i64) -> Result<Option<Guest>, AppError> {
        let sql = format!("{} WHERE id = ?", SELECT_GUEST);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Guest>(&sql).bind(id).fetch_optional(pool).await?)
    }

    /// Guests of an episode, through its appearances.
    pub async fn guests_for_episode(pool: &SqlitePool, episode_id: i64) -> Result<Vec<Guest>, AppError> {
        let sql = r#"
            SELECT g.id, g.name, g.occupation
            FROM appearances a
            JOIN guests g ON g.id = a.guest_id
            WHERE a.episode_id = ?
            ORDER BY a.id
        "#;
        tracing::debug!(sql = %sql.trim(), episode_id, "query");
        Ok(sqlx::query_as::<_, Guest>(sql).bind(episode_id).fetch_all(pool).await?)
    }

    /// Episodes a guest appeared on, through their appearances.
    pub async fn episodes_for_guest(pool: &SqlitePool, guest_id: i64) -> Result<Vec<Episode>, AppError> {
        let sql = r#"
            SELECT e.id, e.date, e.number
            FROM appearances a
            JOIN episodes e ON e.id = a.episode_id
            WHERE a.guest_id = ?
            ORDER BY a.id
        "#;
        tracing::debug!(sql = %sql.trim(), guest_id, "query");
        Ok(sqlx::query_as::<_, Episode>(sql).bind(guest_id).fetch_all(pool).await?)
    }

    pub async fn insert_episode<'e, E>(executor: E, new: &NewEpisode) -> Result<Episode, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = "INSERT INTO episodes (id, date, number) VALUES (?, ?, ?) RETURNING id, date, number";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Episode>(sql)
            .bind(new.id)
            .bind(&new.date)
            .bind(new.number)
            .fetch_one(executor)
            .await?)
    }

    pub async fn insert_guest<'e, E>(executor: E, new: &NewGuest) -> Result<Guest, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = "INSERT INTO guests (id, name, occupation) VALUES (?, ?, ?) RETURNING id, name, occupation";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Guest>(sql)
            .bind(new.id)
            .bind(&new.name)
            .bind(&new.occupation)
            .fetch_one(executor)
            .await?)
    }

    pub async fn insert_appearance<'e, E>(executor: E, new: &NewAppearance) -> Result<Appearance, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sql = "INSERT INTO appearances (rating, episode_id, guest_id) VALUES (?, ?, ?) \
                   RETURNING id, rating, episode_id, guest_id";
        tracing::debug!(sql = %sql, episode_id = new.episode_id, guest_id = new.guest_id, "query");
        Ok(sqlx::query_as::<_, Appearance>(sql)
            .bind(new.rating.get())
            .bind(new.episode_id)
            .bind(new.guest_id)
            .fetch_one(executor)
            .await?)
    }

    /// Insert one appearance and commit. A failed insert rolls the transaction back.
    pub async fn create_appearance(pool: &SqlitePool, new: &NewAppearance) -> Result<Appearance, AppError> {
        let mut tx = pool.begin().await?;
        match Self::insert_appearance(&mut *tx, new).await {
            Ok(row) => {
                tx.commit().await?;
                Ok(row)
            }
            Err(e) => {
                tracing::warn!(error = %e, "appearance insert failed, rolling back");
                if let Err(rb) = tx.rollback().await {
                    tracing::warn!(error = %rb, "rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Delete an episode and, by cascade, its appearances. Returns false if no row matched.
    pub async fn delete_episode(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let sql = "DELETE FROM episodes WHERE id = ?";
        tracing::debug!(sql = %sql, id, "query");
        let done = sqlx::query(sql).bind(id).execute(pool).await?;
        Ok(done.rows_affected() > 0)
    }

    /// Delete a guest and, by cascade, their appearances. Returns false if no row matched.
    pub async fn delete_guest(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        let sql = "DELETE FROM guests WHERE id = ?";
        tracing::debug!(sql = %sql, id, "query");
        let done = sqlx::query(sql).bind(id).execute(pool).await?;
        Ok(done.rows_affected() > 0)
    }

    /// Cheapest round trip to the database.
    pub async fn ping(pool: &SqlitePool) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    pub async fn count_appearances(pool: &SqlitePool) -> Result<i64, AppError> {
        let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM appearances").fetch_one(pool).await?;
        Ok(n)
    }
}
