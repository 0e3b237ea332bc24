//! Inbound Slack interactive callback payload.
//!
//! Slack posts `application/x-www-form-urlencoded` with a single `payload`
//! field whose value is a JSON document. Of that document the service
//! needs exactly four fields: the correlation token (`callback_id`), the
//! chosen action's value, and the voter's id and display name. Everything
//! else is ignored.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::PollKey;
use crate::error::PollError;

/// Form wrapper around the interactive callback: `payload=<json>`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VoteCallbackForm {
    /// JSON document as posted by Slack.
    pub payload: String,
}

/// The slice of Slack's attachment action callback the service reads.
#[derive(Debug, Deserialize)]
pub struct VoteCallback {
    /// Correlation token: the poll key the buttons were tagged with.
    pub callback_id: String,
    /// Pressed actions. Slack sends exactly one per button press.
    pub actions: Vec<CallbackAction>,
    /// The user who pressed the button.
    pub user: CallbackUser,
}

/// One pressed action within the callback.
#[derive(Debug, Deserialize)]
pub struct CallbackAction {
    /// Value token of the chosen option.
    pub value: String,
}

/// Voter identity as reported by Slack.
#[derive(Debug, Deserialize)]
pub struct CallbackUser {
    /// Slack user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// The four fields extracted from a vote callback.
#[derive(Debug, PartialEq, Eq)]
pub struct VoteIntent {
    /// Poll the vote targets.
    pub key: PollKey,
    /// Chosen option value.
    pub value: String,
    /// Voter identifier.
    pub voter_id: String,
    /// Voter display name.
    pub voter_name: String,
}

impl VoteIntent {
    /// Parses the callback JSON into a vote intent.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::ParseError`] on malformed JSON or when the
    /// payload carries no action.
    pub fn parse(payload: &str) -> Result<Self, PollError> {
        let callback: VoteCallback =
            serde_json::from_str(payload).map_err(|e| PollError::ParseError(e.to_string()))?;

        let action = callback
            .actions
            .first()
            .ok_or_else(|| PollError::ParseError("payload has no actions".to_string()))?;

        Ok(Self {
            key: PollKey::new(callback.callback_id.clone()),
            value: action.value.clone(),
            voter_id: callback.user.id,
            voter_name: callback.user.name,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    /// Trimmed-down version of a real Slack attachment action callback.
    /// Unknown fields (team, channel, original_message, ...) are ignored.
    const REAL_PAYLOAD: &str = r#"{
        "actions": [{"name": "lunch", "type": "button", "value": "leon"}],
        "callback_id": "lunch_1",
        "team": {"id": "T03NPFSEK", "domain": "tangent-sap"},
        "channel": {"id": "C03NPFSEV", "name": "general"},
        "user": {"id": "U03NPFSEP", "name": "tom"},
        "action_ts": "1499622670.854364",
        "message_ts": "1499622351.295776",
        "token": "gorIxX00vvzuqHT7vye1ng63"
    }"#;

    #[test]
    fn parses_the_four_fields_from_a_real_payload() {
        let intent = VoteIntent::parse(REAL_PAYLOAD);
        let Ok(intent) = intent else {
            panic!("parse failed");
        };
        assert_eq!(intent.key, PollKey::new("lunch_1"));
        assert_eq!(intent.value, "leon");
        assert_eq!(intent.voter_id, "U03NPFSEP");
        assert_eq!(intent.voter_name, "tom");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = VoteIntent::parse("not json at all");
        assert!(matches!(result, Err(PollError::ParseError(_))));
    }

    #[test]
    fn missing_fields_are_a_parse_error() {
        let result = VoteIntent::parse(r#"{"callback_id": "lunch_1"}"#);
        assert!(matches!(result, Err(PollError::ParseError(_))));
    }

    #[test]
    fn empty_actions_are_a_parse_error() {
        let payload = r#"{
            "callback_id": "lunch_1",
            "actions": [],
            "user": {"id": "U1", "name": "tom"}
        }"#;
        let result = VoteIntent::parse(payload);
        assert!(matches!(result, Err(PollError::ParseError(_))));
    }
}
