//! Service error types with HTTP status code mapping.
//!
//! [`PollError`] is the central error type. Each variant maps to a specific
//! HTTP status code and a structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4002,
///     "message": "voter U1 has already voted on lunch_32",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`PollError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category           | HTTP Status                  |
/// |-----------|--------------------|------------------------------|
/// | 1000–1999 | Validation/Parsing | 400 Bad Request              |
/// | 2000–2999 | State/Not Found    | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server/Delivery    | 500 / 502                    |
/// | 4000–4999 | Voting rules       | 409 Conflict / 422           |
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// No poll exists for the given key.
    #[error("poll not found: {0}")]
    NotFound(String),

    /// A poll already exists for the current week's key.
    #[error("poll already exists for key {0}")]
    AlreadyExists(String),

    /// The poll is closed; votes are no longer accepted.
    #[error("voting is closed on poll {0}")]
    VotingClosed(String),

    /// The voter already has a recorded vote on this poll.
    #[error("voter {voter_id} has already voted on {key}")]
    DuplicateVote {
        /// Poll key the duplicate vote targeted.
        key: String,
        /// Slack user identifier of the voter.
        voter_id: String,
    },

    /// The vote's value does not match any option on the poll.
    #[error("option value {0:?} is not on the poll")]
    InvalidOption(String),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Inbound callback payload could not be parsed.
    #[error("malformed callback payload: {0}")]
    ParseError(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Broadcast to the chat channel failed.
    #[error("broadcast delivery failed: {0}")]
    DeliveryError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PollError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::ParseError(_) => 1002,
            Self::NotFound(_) => 2001,
            Self::AlreadyExists(_) => 2002,
            Self::Internal(_) => 3000,
            Self::PersistenceError(_) => 3001,
            Self::DeliveryError(_) => 3002,
            Self::VotingClosed(_) => 4001,
            Self::DuplicateVote { .. } => 4002,
            Self::InvalidOption(_) => 4003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::ParseError(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) | Self::VotingClosed(_) | Self::DuplicateVote { .. } => {
                StatusCode::CONFLICT
            }
            Self::InvalidOption(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::DeliveryError(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for PollError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
