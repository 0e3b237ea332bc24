//! Persistence layer: the key-value poll store contract.
//!
//! [`PollStore`] is the single seam between the service and the backing
//! medium. Two implementations exist: [`SqliteStore`] for durable storage
//! and [`MemoryStore`] for tests and ephemeral runs.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::domain::{Poll, PollKey};
use crate::error::PollError;

/// Key-value contract backing the poll service.
///
/// `store` overwrites any existing value for the key unconditionally and
/// stamps the returned poll's key to the given key. Serialization between
/// callers and the medium must round-trip losslessly. The concrete store
/// exclusively owns its medium's handle for the process lifetime.
#[async_trait]
pub trait PollStore: Send + Sync + std::fmt::Debug {
    /// Loads the poll stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::NotFound`] when no poll exists for the key,
    /// [`PollError::PersistenceError`] on medium failure.
    async fn find(&self, key: &PollKey) -> Result<Poll, PollError>;

    /// Writes `poll` under `key`, overwriting any existing value.
    ///
    /// The write is durable before this returns for the durable store.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::PersistenceError`] on medium failure.
    async fn store(&self, key: &PollKey, poll: Poll) -> Result<Poll, PollError>;

    /// Returns a snapshot of all stored polls. Order unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::PersistenceError`] on medium failure.
    async fn list(&self) -> Result<Vec<Poll>, PollError>;
}
