//! Service layer: poll business logic.
//!
//! [`PollService`] coordinates the poll lifecycle — create, vote, close,
//! tally — against the [`crate::persistence::PollStore`] contract and
//! announces new polls through the [`crate::broadcast::Broadcaster`].

pub mod poll_service;

pub use poll_service::PollService;
