//! Domain layer: the poll aggregate and its week-derived key.
//!
//! This module contains the core data model — [`Poll`], [`PollOption`],
//! [`Vote`] — together with [`PollKey`], the ISO-week-derived identifier
//! that doubles as the Slack callback correlation token.

pub mod poll;
pub mod poll_key;

pub use poll::{Poll, PollOption, Vote};
pub use poll_key::PollKey;
