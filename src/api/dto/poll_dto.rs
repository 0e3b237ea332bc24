//! Poll-related DTOs for create, view, tally, and list operations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Poll;

/// Request body for `POST /polls`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePollRequest {
    /// The question the team votes on.
    pub question: String,
    /// Option labels, between 1 and 5 after empty slots are dropped.
    /// Each label doubles as the option's value token.
    pub options: Vec<String>,
}

/// One selectable option as rendered to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct OptionDto {
    /// Display label.
    pub text: String,
    /// Value token votes are matched against.
    pub value: String,
}

/// Poll representation returned by mutating endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct PollResponse {
    /// Poll key (`lunch_<week-number>`).
    pub key: String,
    /// Poll question.
    pub question: String,
    /// Whether votes are still accepted.
    pub open: bool,
    /// Selectable options.
    pub options: Vec<OptionDto>,
    /// Number of recorded votes.
    pub vote_count: usize,
}

impl From<&Poll> for PollResponse {
    fn from(poll: &Poll) -> Self {
        Self {
            key: poll.key.to_string(),
            question: poll.question.clone(),
            open: poll.open,
            options: poll
                .options
                .iter()
                .map(|o| OptionDto {
                    text: o.text.clone(),
                    value: o.value.clone(),
                })
                .collect(),
            vote_count: poll.votes.len(),
        }
    }
}

/// Poll detail with tally, the read-side view for rendering.
#[derive(Debug, Serialize, ToSchema)]
pub struct PollDetailResponse {
    /// Poll key.
    pub key: String,
    /// Poll question.
    pub question: String,
    /// Whether votes are still accepted.
    pub open: bool,
    /// Selectable options.
    pub options: Vec<OptionDto>,
    /// Vote counts grouped by option value.
    pub tally: HashMap<String, usize>,
}

impl From<&Poll> for PollDetailResponse {
    fn from(poll: &Poll) -> Self {
        Self {
            key: poll.key.to_string(),
            question: poll.question.clone(),
            open: poll.open,
            options: poll
                .options
                .iter()
                .map(|o| OptionDto {
                    text: o.text.clone(),
                    value: o.value.clone(),
                })
                .collect(),
            tally: poll.tally(),
        }
    }
}

/// Poll summary for list responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct PollSummaryDto {
    /// Poll key.
    pub key: String,
    /// Poll question.
    pub question: String,
    /// Whether votes are still accepted.
    pub open: bool,
    /// Number of options.
    pub option_count: usize,
    /// Number of recorded votes.
    pub vote_count: usize,
}

impl From<&Poll> for PollSummaryDto {
    fn from(poll: &Poll) -> Self {
        Self {
            key: poll.key.to_string(),
            question: poll.question.clone(),
            open: poll.open,
            option_count: poll.options.len(),
            vote_count: poll.votes.len(),
        }
    }
}

/// List response for `GET /polls`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PollListResponse {
    /// Poll summaries, order unspecified.
    pub data: Vec<PollSummaryDto>,
}

/// Tally response for `GET /polls/{key}/tally`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TallyResponse {
    /// Poll key.
    pub key: String,
    /// Vote counts grouped by option value.
    pub counts: HashMap<String, usize>,
}
