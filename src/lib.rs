//! # lunchpoll
//!
//! Weekly lunch poll service. One poll per ISO calendar week, broadcast to a
//! Slack channel as interactive buttons, one vote per user, tally on demand.
//!
//! All poll state lives in a key-value store keyed by `lunch_<week-number>`;
//! this service is a thin coordination layer over that bucket.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, Slack interactive callbacks)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── PollService (service/)
//!     │
//!     ├── Poll aggregate (domain/)
//!     │
//!     ├── PollStore (persistence/)
//!     │     ├── SqliteStore  — durable
//!     │     └── MemoryStore  — tests / ephemeral
//!     │
//!     └── Broadcaster (broadcast/)
//!           └── SlackClient  — chat.postMessage
//! ```

pub mod api;
pub mod app_state;
pub mod broadcast;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
