//! # Snapshot Repository
//!
//! Reads and writes rows of the `snapshots` table.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StorageResult;

/// Repository for snapshot rows.
///
/// ## Usage
/// ```rust,ignore
/// let repo = SnapshotRepository::new(pool);
/// repo.put("despensa-cart", &json).await?;
/// let json = repo.get("despensa-cart").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Returns the value stored under `key`.
    pub async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM snapshots WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Inserts or replaces the value under `key`.
    pub async fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing snapshot row");

        sqlx::query(
            r#"
            INSERT INTO snapshots (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes the row for `key`.
    ///
    /// ## Returns
    /// `true` if a row was deleted.
    pub async fn delete(&self, key: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM snapshots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
