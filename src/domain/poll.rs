//! The poll aggregate: question, options, votes, and the open flag.
//!
//! All voting invariants live here, on the aggregate itself:
//! votes are only appended while the poll is open, each voter may vote at
//! most once, and a vote's value must match one of the poll's options.
//! The service layer loads a [`Poll`], applies one mutation, and writes it
//! back; it never bypasses these checks.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::PollKey;
use crate::error::PollError;

/// Maximum number of options a poll may carry.
pub const MAX_OPTIONS: usize = 5;

/// One selectable lunch choice on a poll.
///
/// `text` is the display label rendered on the Slack button; `value` is
/// the token inbound votes are matched against. The two may coincide or
/// differ freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    /// Display label.
    pub text: String,
    /// Value token votes are matched against.
    pub value: String,
}

impl PollOption {
    /// Creates an option with the given label and value token.
    #[must_use]
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }
}

/// One voter's single, immutable choice recorded against a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Value token of the chosen option.
    pub value: String,
    /// Slack user identifier of the voter.
    pub user_id: String,
    /// Display name of the voter.
    pub user_name: String,
}

impl Vote {
    /// Creates a vote for the given option value by the given voter.
    #[must_use]
    pub fn new(
        value: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
        }
    }
}

/// One week's lunch-choice poll, keyed by ISO week number.
///
/// Acts as an append-only historical record: created once per week,
/// mutated only by vote-append and close, never deleted. Serialized as a
/// self-describing JSON record; the round trip is lossless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    /// Store key and Slack callback correlation token. Immutable once
    /// the poll is created.
    pub key: PollKey,
    /// The question or prompt the team is voting on.
    pub question: String,
    /// Ordered list of selectable options.
    pub options: Vec<PollOption>,
    /// Ordered list of recorded votes (append-only while open).
    pub votes: Vec<Vote>,
    /// Whether votes are still being accepted.
    pub open: bool,
}

impl Poll {
    /// Creates a new open poll with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::InvalidRequest`] when the option count is not
    /// between 1 and [`MAX_OPTIONS`].
    pub fn new(
        key: PollKey,
        question: impl Into<String>,
        options: Vec<PollOption>,
    ) -> Result<Self, PollError> {
        if options.is_empty() || options.len() > MAX_OPTIONS {
            return Err(PollError::InvalidRequest(format!(
                "poll needs between 1 and {MAX_OPTIONS} options, got {}",
                options.len()
            )));
        }
        Ok(Self {
            key,
            question: question.into(),
            options,
            votes: Vec::new(),
            open: true,
        })
    }

    /// Returns `true` if the given voter already has a recorded vote.
    #[must_use]
    pub fn has_voted(&self, voter_id: &str) -> bool {
        self.votes.iter().any(|v| v.user_id == voter_id)
    }

    /// Returns `true` if some option carries the given value token.
    #[must_use]
    pub fn has_option_value(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Appends a vote, enforcing the voting invariants.
    ///
    /// # Errors
    ///
    /// - [`PollError::VotingClosed`] when the poll is not open.
    /// - [`PollError::DuplicateVote`] when the voter already voted.
    /// - [`PollError::InvalidOption`] when the value matches no option.
    pub fn record_vote(&mut self, vote: Vote) -> Result<(), PollError> {
        if !self.open {
            return Err(PollError::VotingClosed(self.key.to_string()));
        }
        if self.has_voted(&vote.user_id) {
            return Err(PollError::DuplicateVote {
                key: self.key.to_string(),
                voter_id: vote.user_id,
            });
        }
        if !self.has_option_value(&vote.value) {
            return Err(PollError::InvalidOption(vote.value));
        }
        self.votes.push(vote);
        Ok(())
    }

    /// Closes the poll. Idempotent: closing a closed poll is a no-op.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Counts votes grouped by option value.
    #[must_use]
    pub fn tally(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for vote in &self.votes {
            *counts.entry(vote.value.clone()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn make_poll() -> Poll {
        let options = vec![
            PollOption::new("Pret", "pret"),
            PollOption::new("Leon", "leon"),
        ];
        let Ok(poll) = Poll::new(PollKey::new("lunch_1"), "What's for lunch?", options) else {
            panic!("two options should be valid");
        };
        poll
    }

    #[test]
    fn new_poll_is_open_with_no_votes() {
        let poll = make_poll();
        assert!(poll.open);
        assert!(poll.votes.is_empty());
        assert_eq!(poll.options.len(), 2);
    }

    #[test]
    fn new_rejects_empty_options() {
        let result = Poll::new(PollKey::new("lunch_1"), "q", vec![]);
        assert!(matches!(result, Err(PollError::InvalidRequest(_))));
    }

    #[test]
    fn new_rejects_more_than_five_options() {
        let options = (0..6)
            .map(|i| PollOption::new(format!("o{i}"), format!("o{i}")))
            .collect();
        let result = Poll::new(PollKey::new("lunch_1"), "q", options);
        assert!(matches!(result, Err(PollError::InvalidRequest(_))));
    }

    #[test]
    fn record_vote_appends_exactly_one() {
        let mut poll = make_poll();
        let result = poll.record_vote(Vote::new("leon", "U1", "tom"));
        assert!(result.is_ok());
        assert_eq!(poll.votes.len(), 1);
        assert_eq!(poll.votes.first().map(|v| v.value.as_str()), Some("leon"));
    }

    #[test]
    fn second_vote_by_same_voter_is_rejected() {
        let mut poll = make_poll();
        let _ = poll.record_vote(Vote::new("leon", "U1", "tom"));
        let result = poll.record_vote(Vote::new("pret", "U1", "tom"));
        assert!(matches!(result, Err(PollError::DuplicateVote { .. })));
        assert_eq!(poll.votes.len(), 1);
    }

    #[test]
    fn vote_on_closed_poll_is_rejected() {
        let mut poll = make_poll();
        poll.close();
        let result = poll.record_vote(Vote::new("leon", "U1", "tom"));
        assert!(matches!(result, Err(PollError::VotingClosed(_))));
        assert!(poll.votes.is_empty());
    }

    #[test]
    fn vote_for_unknown_value_is_rejected() {
        let mut poll = make_poll();
        let result = poll.record_vote(Vote::new("sushi", "U1", "tom"));
        assert!(matches!(result, Err(PollError::InvalidOption(_))));
        assert!(poll.votes.is_empty());
    }

    #[test]
    fn close_is_idempotent() {
        let mut poll = make_poll();
        poll.close();
        assert!(!poll.open);
        poll.close();
        assert!(!poll.open);
    }

    #[test]
    fn tally_counts_votes_by_value() {
        let mut poll = make_poll();
        let _ = poll.record_vote(Vote::new("leon", "U1", "tom"));
        let _ = poll.record_vote(Vote::new("leon", "U2", "ana"));
        let _ = poll.record_vote(Vote::new("pret", "U3", "raj"));

        let tally = poll.tally();
        assert_eq!(tally.get("leon"), Some(&2));
        assert_eq!(tally.get("pret"), Some(&1));
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn serde_round_trip_is_lossless() {
        let mut poll = make_poll();
        let _ = poll.record_vote(Vote::new("leon", "U1", "tom"));
        poll.close();

        let json = serde_json::to_string(&poll).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        let back: Option<Poll> = serde_json::from_str(&json).ok();
        assert_eq!(back.as_ref(), Some(&poll));
    }
}
