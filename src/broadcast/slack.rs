//! Slack implementation of the broadcaster.
//!
//! Posts the poll with `chat.postMessage` as one legacy attachment whose
//! `callback_id` carries the poll key and whose actions are one button per
//! option. Slack echoes the key back in the interactive callback, which is
//! how an inbound vote is correlated to its poll.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Broadcaster;
use crate::domain::Poll;
use crate::error::PollError;

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

/// Slack Web API client for poll announcements.
#[derive(Debug, Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl SlackClient {
    /// Creates a client with the given bot token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            base_url: POST_MESSAGE_URL.to_string(),
        }
    }

    /// Overrides the `chat.postMessage` endpoint. Test hook.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Request body for `chat.postMessage`.
#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
    attachments: Vec<Attachment>,
}

/// A legacy message attachment carrying the vote buttons.
#[derive(Debug, Serialize)]
struct Attachment {
    text: String,
    callback_id: String,
    actions: Vec<AttachmentAction>,
}

/// One interactive button on the attachment.
#[derive(Debug, Serialize)]
struct AttachmentAction {
    name: &'static str,
    text: String,
    value: String,
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Minimal `chat.postMessage` response: Slack reports API-level failures
/// with `ok: false` and a 200 status.
#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Renders the poll as a message attachment with one button per option.
fn poll_to_attachment(poll: &Poll) -> Attachment {
    Attachment {
        text: poll.question.clone(),
        callback_id: poll.key.to_string(),
        actions: poll
            .options
            .iter()
            .map(|o| AttachmentAction {
                name: "lunch",
                text: o.text.clone(),
                value: o.value.clone(),
                kind: "button",
            })
            .collect(),
    }
}

#[async_trait]
impl Broadcaster for SlackClient {
    async fn announce(&self, channel: &str, text: &str, poll: &Poll) -> Result<(), PollError> {
        let body = PostMessageRequest {
            channel,
            text,
            attachments: vec![poll_to_attachment(poll)],
        };

        let response = self
            .http
            .post(&self.base_url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| PollError::DeliveryError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PollError::DeliveryError(format!(
                "slack returned HTTP {status}"
            )));
        }

        let parsed: PostMessageResponse = response
            .json()
            .await
            .map_err(|e| PollError::DeliveryError(e.to_string()))?;

        if !parsed.ok {
            return Err(PollError::DeliveryError(
                parsed.error.unwrap_or_else(|| "unknown slack error".to_string()),
            ));
        }

        tracing::info!(key = %poll.key, channel, "poll announced");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{PollKey, PollOption};

    fn make_poll() -> Poll {
        let Ok(poll) = Poll::new(
            PollKey::new("lunch_1"),
            "What's for lunch?",
            vec![
                PollOption::new("Pret", "pret"),
                PollOption::new("Leon", "leon"),
            ],
        ) else {
            panic!("valid poll");
        };
        poll
    }

    #[test]
    fn attachment_carries_key_as_callback_id() {
        let attachment = poll_to_attachment(&make_poll());
        assert_eq!(attachment.callback_id, "lunch_1");
        assert_eq!(attachment.text, "What's for lunch?");
    }

    #[test]
    fn attachment_has_one_button_per_option() {
        let attachment = poll_to_attachment(&make_poll());
        assert_eq!(attachment.actions.len(), 2);
        for action in &attachment.actions {
            assert_eq!(action.kind, "button");
            assert_eq!(action.name, "lunch");
        }
        let values: Vec<&str> = attachment.actions.iter().map(|a| a.value.as_str()).collect();
        assert_eq!(values, vec!["pret", "leon"]);
    }

    #[test]
    fn request_serializes_to_slack_shape() {
        let poll = make_poll();
        let body = PostMessageRequest {
            channel: "#general",
            text: "What's for lunch?",
            attachments: vec![poll_to_attachment(&poll)],
        };
        let json = serde_json::to_value(&body).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json.pointer("/channel").and_then(|v| v.as_str()), Some("#general"));
        assert_eq!(
            json.pointer("/attachments/0/callback_id").and_then(|v| v.as_str()),
            Some("lunch_1")
        );
        assert_eq!(
            json.pointer("/attachments/0/actions/1/type").and_then(|v| v.as_str()),
            Some("button")
        );
    }
}
