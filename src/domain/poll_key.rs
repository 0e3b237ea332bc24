//! Type-safe poll identifier derived from the ISO calendar week.
//!
//! [`PollKey`] is a newtype wrapper around `String` providing type safety
//! so that poll keys cannot be confused with other strings. The canonical
//! key for a week is `lunch_<week-number>`.

use std::fmt;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for a weekly lunch poll.
///
/// The canonical form is `lunch_<iso-week-number>` (no zero padding, so
/// always `lunch_` followed by 1–2 digits). The key is immutable once a
/// poll is created and is used as the dictionary key in the store and as
/// the `callback_id` correlation token on Slack messages. Inbound
/// correlation tokens are opaque, so arbitrary strings are representable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PollKey(String);

impl PollKey {
    /// Creates a `PollKey` from an arbitrary string.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key for the current ISO-8601 week.
    ///
    /// Deterministic function of wall-clock time: any two calls within the
    /// same ISO week return identical keys.
    #[must_use]
    pub fn current() -> Self {
        Self(format!("lunch_{}", Utc::now().iso_week().week()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PollKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PollKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for PollKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<PollKey> for String {
    fn from(key: PollKey) -> Self {
        key.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn current_matches_lunch_week_pattern() {
        let key = PollKey::current();
        let Some(digits) = key.as_str().strip_prefix("lunch_") else {
            panic!("key missing lunch_ prefix: {key}");
        };
        assert!(!digits.is_empty() && digits.len() <= 2);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn current_is_stable_within_a_week() {
        assert_eq!(PollKey::current(), PollKey::current());
    }

    #[test]
    fn display_round_trips() {
        let key = PollKey::new("lunch_7");
        assert_eq!(format!("{key}"), "lunch_7");
        assert_eq!(key.as_str(), "lunch_7");
    }

    #[test]
    fn serde_is_transparent() {
        let key = PollKey::new("lunch_42");
        let json = serde_json::to_string(&key).ok();
        assert_eq!(json.as_deref(), Some("\"lunch_42\""));
        let back: Option<PollKey> = serde_json::from_str("\"lunch_42\"").ok();
        assert_eq!(back, Some(key));
    }

    #[test]
    fn hash_works_in_hashmap() {
        use std::collections::HashMap;
        let key = PollKey::new("lunch_3");
        let mut map = HashMap::new();
        map.insert(key.clone(), "test");
        assert_eq!(map.get(&key), Some(&"test"));
    }
}
