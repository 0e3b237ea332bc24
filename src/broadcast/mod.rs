//! Broadcast layer: announcing a new poll to the chat channel.
//!
//! [`Broadcaster`] is the outbound seam. The production implementation is
//! [`SlackClient`] (`chat.postMessage`); [`NoopBroadcaster`] stands in when
//! broadcasting is disabled or no token is configured.

pub mod slack;

pub use slack::SlackClient;

use async_trait::async_trait;

use crate::domain::Poll;
use crate::error::PollError;

/// Outbound channel for poll announcements.
///
/// Implementations render one interactive action per poll option, tagged
/// with the poll's key as the callback correlation token.
#[async_trait]
pub trait Broadcaster: Send + Sync + std::fmt::Debug {
    /// Posts the poll to `channel` with `text` as the message body.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::DeliveryError`] when the message cannot be
    /// delivered.
    async fn announce(&self, channel: &str, text: &str, poll: &Poll) -> Result<(), PollError>;
}

/// Broadcaster that logs and succeeds without posting anywhere.
#[derive(Debug, Default)]
pub struct NoopBroadcaster;

#[async_trait]
impl Broadcaster for NoopBroadcaster {
    async fn announce(&self, channel: &str, _text: &str, poll: &Poll) -> Result<(), PollError> {
        tracing::info!(key = %poll.key, channel, "broadcast disabled, skipping announcement");
        Ok(())
    }
}
