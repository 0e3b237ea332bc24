//! Slack interactive callback handler: the vote endpoint.

use axum::Router;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Form, Json};

use crate::api::dto::{PollResponse, VoteCallbackForm, VoteIntent};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, PollError};

/// `POST /vote` — Record a vote from a Slack button press.
///
/// Slack posts a form with a single `payload` field containing the
/// attachment action callback as JSON. The poll key travels in
/// `callback_id`.
///
/// # Errors
///
/// Returns [`PollError::ParseError`] on a malformed payload, plus any
/// voting-rule failure from the service.
#[utoipa::path(
    post,
    path = "/api/v1/vote",
    tag = "Votes",
    summary = "Record a vote (Slack interactive callback)",
    description = "Consumes Slack's form-encoded `payload` field, extracts poll key, option value, and voter identity, and appends the vote.",
    responses(
        (status = 200, description = "Vote recorded", body = PollResponse),
        (status = 400, description = "Malformed payload", body = ErrorResponse),
        (status = 404, description = "Poll not found", body = ErrorResponse),
        (status = 409, description = "Voting closed or duplicate vote", body = ErrorResponse),
        (status = 422, description = "Unknown option value", body = ErrorResponse),
    )
)]
pub async fn vote_handler(
    State(state): State<AppState>,
    Form(form): Form<VoteCallbackForm>,
) -> Result<impl IntoResponse, PollError> {
    let intent = VoteIntent::parse(&form.payload)?;

    let poll = state
        .poll_service
        .cast_vote(&intent.key, &intent.voter_id, &intent.voter_name, &intent.value)
        .await?;

    Ok(Json(PollResponse::from(&poll)))
}

/// Vote callback route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/vote", post(vote_handler))
}
