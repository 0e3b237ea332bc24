//! SQLite implementation of the poll store.
//!
//! Polls are kept in a single `polls` table as self-describing JSON
//! records keyed by the poll key. SQLite commits before `store` returns,
//! so a successful write is durable.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::PollStore;
use crate::domain::{Poll, PollKey};
use crate::error::PollError;

/// Durable poll store backed by `sqlx::SqlitePool`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (and creates, if missing) the database and the `polls` table.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::PersistenceError`] when the database cannot be
    /// opened or the schema cannot be created. Callers treat this as fatal
    /// at startup.
    pub async fn connect(database_url: &str) -> Result<Self, PollError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| PollError::PersistenceError(e.to_string()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(|e| PollError::PersistenceError(e.to_string()))?;

        sqlx::query("CREATE TABLE IF NOT EXISTS polls (key TEXT PRIMARY KEY, body TEXT NOT NULL)")
            .execute(&pool)
            .await
            .map_err(|e| PollError::PersistenceError(e.to_string()))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl PollStore for SqliteStore {
    async fn find(&self, key: &PollKey) -> Result<Poll, PollError> {
        let row = sqlx::query_scalar::<_, String>("SELECT body FROM polls WHERE key = ?1")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PollError::PersistenceError(e.to_string()))?;

        let body = row.ok_or_else(|| PollError::NotFound(key.to_string()))?;
        serde_json::from_str(&body).map_err(|e| PollError::PersistenceError(e.to_string()))
    }

    async fn store(&self, key: &PollKey, mut poll: Poll) -> Result<Poll, PollError> {
        poll.key = key.clone();
        let body = serde_json::to_string(&poll)
            .map_err(|e| PollError::PersistenceError(e.to_string()))?;

        sqlx::query(
            "INSERT INTO polls (key, body) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET body = excluded.body",
        )
        .bind(key.as_str())
        .bind(body)
        .execute(&self.pool)
        .await
        .map_err(|e| PollError::PersistenceError(e.to_string()))?;

        Ok(poll)
    }

    async fn list(&self) -> Result<Vec<Poll>, PollError> {
        let rows = sqlx::query_scalar::<_, String>("SELECT body FROM polls")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PollError::PersistenceError(e.to_string()))?;

        let mut polls = Vec::with_capacity(rows.len());
        for body in rows {
            let poll = serde_json::from_str(&body)
                .map_err(|e| PollError::PersistenceError(e.to_string()))?;
            polls.push(poll);
        }
        Ok(polls)
    }
}
