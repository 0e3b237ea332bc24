//! In-memory poll store for tests and ephemeral runs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::PollStore;
use crate::domain::{Poll, PollKey};
use crate::error::PollError;

/// Poll store backed by a `RwLock<HashMap>`.
///
/// Mirrors the durable store's contract exactly: `store` overwrites
/// unconditionally and stamps the poll's key. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    polls: RwLock<HashMap<String, Poll>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PollStore for MemoryStore {
    async fn find(&self, key: &PollKey) -> Result<Poll, PollError> {
        let map = self.polls.read().await;
        map.get(key.as_str())
            .cloned()
            .ok_or_else(|| PollError::NotFound(key.to_string()))
    }

    async fn store(&self, key: &PollKey, mut poll: Poll) -> Result<Poll, PollError> {
        poll.key = key.clone();
        let mut map = self.polls.write().await;
        map.insert(key.to_string(), poll.clone());
        Ok(poll)
    }

    async fn list(&self) -> Result<Vec<Poll>, PollError> {
        let map = self.polls.read().await;
        Ok(map.values().cloned().collect())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::PollOption;

    fn make_poll(key: &str) -> Poll {
        let Ok(poll) = Poll::new(
            PollKey::new(key),
            "What's for lunch?",
            vec![PollOption::new("Pret", "pret")],
        ) else {
            panic!("valid poll");
        };
        poll
    }

    #[tokio::test]
    async fn store_then_find_round_trips() {
        let store = MemoryStore::new();
        let key = PollKey::new("lunch_1");
        let stored = store.store(&key, make_poll("lunch_1")).await;
        assert!(stored.is_ok());

        let found = store.find(&key).await;
        let Ok(found) = found else {
            panic!("poll should exist");
        };
        assert_eq!(found.key, key);
        assert_eq!(found.question, "What's for lunch?");
    }

    #[tokio::test]
    async fn find_missing_key_is_not_found() {
        let store = MemoryStore::new();
        let result = store.find(&PollKey::new("lunch_99")).await;
        assert!(matches!(result, Err(PollError::NotFound(_))));
    }

    #[tokio::test]
    async fn store_stamps_the_key() {
        let store = MemoryStore::new();
        let key = PollKey::new("lunch_2");
        // Poll built with a different key: store must stamp it.
        let result = store.store(&key, make_poll("lunch_1")).await;
        let Ok(stored) = result else {
            panic!("store failed");
        };
        assert_eq!(stored.key, key);
    }

    #[tokio::test]
    async fn store_overwrites_unconditionally() {
        let store = MemoryStore::new();
        let key = PollKey::new("lunch_1");
        let _ = store.store(&key, make_poll("lunch_1")).await;

        let mut updated = make_poll("lunch_1");
        updated.close();
        let _ = store.store(&key, updated).await;

        let found = store.find(&key).await;
        let Ok(found) = found else {
            panic!("poll should exist");
        };
        assert!(!found.open);
    }

    #[tokio::test]
    async fn list_returns_all_polls() {
        let store = MemoryStore::new();
        let _ = store.store(&PollKey::new("lunch_1"), make_poll("lunch_1")).await;
        let _ = store.store(&PollKey::new("lunch_2"), make_poll("lunch_2")).await;

        let polls = store.list().await;
        let Ok(polls) = polls else {
            panic!("list failed");
        };
        assert_eq!(polls.len(), 2);
    }
}
