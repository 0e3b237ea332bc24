//! Poll service: orchestrates poll operations against the store.
//!
//! Every mutation follows the pattern: acquire the poll key's lock → load
//! from the store → mutate the aggregate → write back. The per-key lock
//! makes the read-modify-write atomic per poll, so two concurrent votes
//! can never overwrite one another, while operations on different keys
//! stay parallel. Pure reads (tally, detail, list) take no lock.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::broadcast::Broadcaster;
use crate::domain::{Poll, PollKey, PollOption, Vote};
use crate::error::PollError;
use crate::persistence::PollStore;

/// Per-key mutation locks.
///
/// Maps each poll key to its own `Mutex`. Locks are created on first use
/// and never removed; the key space is one key per week, so the map stays
/// tiny for the lifetime of the process.
#[derive(Debug, Default)]
struct KeyLocks {
    locks: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    /// Acquires the lock for `key`, creating it if absent.
    async fn lock(&self, key: &PollKey) -> OwnedMutexGuard<()> {
        // Fast path: lock already exists.
        let existing = {
            let map = self.locks.read().await;
            map.get(key.as_str()).map(Arc::clone)
        };
        let lock = match existing {
            Some(lock) => lock,
            None => {
                let mut map = self.locks.write().await;
                Arc::clone(
                    map.entry(key.to_string())
                        .or_insert_with(|| Arc::new(Mutex::new(()))),
                )
            }
        };
        lock.lock_owned().await
    }
}

/// Orchestration layer for all poll operations.
///
/// Stateless coordinator: owns the store and broadcaster handles plus the
/// per-key lock table. Constructed once at startup and shared via
/// [`crate::app_state::AppState`] (no process-wide singletons).
#[derive(Debug)]
pub struct PollService {
    store: Arc<dyn PollStore>,
    broadcaster: Arc<dyn Broadcaster>,
    channel: String,
    announcement: String,
    locks: KeyLocks,
}

impl PollService {
    /// Creates a new `PollService`.
    #[must_use]
    pub fn new(
        store: Arc<dyn PollStore>,
        broadcaster: Arc<dyn Broadcaster>,
        channel: impl Into<String>,
        announcement: impl Into<String>,
    ) -> Self {
        Self {
            store,
            broadcaster,
            channel: channel.into(),
            announcement: announcement.into(),
            locks: KeyLocks::default(),
        }
    }

    /// Returns the poll key for the current ISO week.
    #[must_use]
    pub fn current_key() -> PollKey {
        PollKey::current()
    }

    /// Creates the current week's poll and announces it.
    ///
    /// Empty or whitespace-only option labels are dropped; each remaining
    /// label becomes an option whose display text and value coincide. The
    /// poll is persisted before the announcement goes out, so a delivery
    /// failure leaves a valid poll behind.
    ///
    /// # Errors
    ///
    /// - [`PollError::AlreadyExists`] when this week's poll exists.
    /// - [`PollError::InvalidRequest`] when no usable options remain or
    ///   more than five are given.
    /// - [`PollError::PersistenceError`] on store failure.
    /// - [`PollError::DeliveryError`] when the announcement fails.
    pub async fn create_poll(
        &self,
        question: &str,
        option_labels: Vec<String>,
    ) -> Result<Poll, PollError> {
        let key = PollKey::current();
        let options: Vec<PollOption> = option_labels
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .map(|l| PollOption::new(l.clone(), l))
            .collect();

        let poll = {
            let _guard = self.locks.lock(&key).await;

            match self.store.find(&key).await {
                Ok(_) => return Err(PollError::AlreadyExists(key.to_string())),
                Err(PollError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }

            let poll = Poll::new(key.clone(), question, options)?;
            self.store.store(&key, poll).await?
        };

        tracing::info!(key = %poll.key, options = poll.options.len(), "poll created");

        self.broadcaster
            .announce(&self.channel, &self.announcement, &poll)
            .await?;

        Ok(poll)
    }

    /// Records a vote on the poll identified by `key`.
    ///
    /// # Errors
    ///
    /// - [`PollError::NotFound`] when no poll exists for the key.
    /// - [`PollError::VotingClosed`] when the poll is closed.
    /// - [`PollError::DuplicateVote`] when the voter already voted.
    /// - [`PollError::InvalidOption`] when the value matches no option.
    /// - [`PollError::PersistenceError`] on store failure.
    pub async fn cast_vote(
        &self,
        key: &PollKey,
        voter_id: &str,
        voter_name: &str,
        value: &str,
    ) -> Result<Poll, PollError> {
        let _guard = self.locks.lock(key).await;

        let mut poll = self.store.find(key).await?;
        poll.record_vote(Vote::new(value, voter_id, voter_name))?;
        let poll = self.store.store(key, poll).await?;

        tracing::info!(key = %poll.key, voter_id, value, "vote recorded");
        Ok(poll)
    }

    /// Closes voting on the poll identified by `key`.
    ///
    /// Idempotent: closing an already-closed poll re-persists
    /// `open = false` without error.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::NotFound`] when no poll exists for the key,
    /// [`PollError::PersistenceError`] on store failure.
    pub async fn close_poll(&self, key: &PollKey) -> Result<Poll, PollError> {
        let _guard = self.locks.lock(key).await;

        let mut poll = self.store.find(key).await?;
        poll.close();
        let poll = self.store.store(key, poll).await?;

        tracing::info!(key = %poll.key, "poll closed");
        Ok(poll)
    }

    /// Counts votes grouped by option value. Pure read.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::NotFound`] when no poll exists for the key.
    pub async fn tally(&self, key: &PollKey) -> Result<HashMap<String, usize>, PollError> {
        let poll = self.store.find(key).await?;
        Ok(poll.tally())
    }

    /// Loads the poll identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::NotFound`] when no poll exists for the key.
    pub async fn find_poll(&self, key: &PollKey) -> Result<Poll, PollError> {
        self.store.find(key).await
    }

    /// Loads the current week's poll.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::NotFound`] when this week has no poll yet.
    pub async fn current_poll(&self) -> Result<Poll, PollError> {
        self.store.find(&PollKey::current()).await
    }

    /// Returns a snapshot of all stored polls.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::PersistenceError`] on store failure.
    pub async fn list_polls(&self) -> Result<Vec<Poll>, PollError> {
        self.store.list().await
    }
}
