//! Poll handlers: create, list, view, tally, close.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreatePollRequest, PollDetailResponse, PollListResponse, PollResponse, PollSummaryDto,
    TallyResponse,
};
use crate::app_state::AppState;
use crate::domain::PollKey;
use crate::error::{ErrorResponse, PollError};

/// `POST /polls` — Create the current week's poll and announce it.
///
/// # Errors
///
/// Returns [`PollError::AlreadyExists`] when this week already has a poll,
/// [`PollError::InvalidRequest`] on a bad option count.
#[utoipa::path(
    post,
    path = "/api/v1/polls",
    tag = "Polls",
    summary = "Create the current week's poll",
    description = "Creates the poll keyed by the current ISO week, persists it, and broadcasts one vote button per option to the configured channel.",
    request_body = CreatePollRequest,
    responses(
        (status = 201, description = "Poll created and announced", body = PollResponse),
        (status = 400, description = "Invalid option count", body = ErrorResponse),
        (status = 409, description = "Poll already exists for this week", body = ErrorResponse),
        (status = 502, description = "Broadcast delivery failed", body = ErrorResponse),
    )
)]
pub async fn create_poll(
    State(state): State<AppState>,
    Json(req): Json<CreatePollRequest>,
) -> Result<impl IntoResponse, PollError> {
    let poll = state
        .poll_service
        .create_poll(&req.question, req.options)
        .await?;
    Ok((StatusCode::CREATED, Json(PollResponse::from(&poll))))
}

/// `GET /polls` — List all stored polls.
///
/// # Errors
///
/// Returns [`PollError::PersistenceError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/polls",
    tag = "Polls",
    summary = "List polls",
    description = "Returns a snapshot of every stored poll, past weeks included. Order unspecified.",
    responses(
        (status = 200, description = "Poll list", body = PollListResponse),
    )
)]
pub async fn list_polls(State(state): State<AppState>) -> Result<impl IntoResponse, PollError> {
    let polls = state.poll_service.list_polls().await?;
    let data = polls.iter().map(PollSummaryDto::from).collect();
    Ok(Json(PollListResponse { data }))
}

/// `GET /polls/current` — The current week's poll.
///
/// # Errors
///
/// Returns [`PollError::NotFound`] when this week has no poll yet.
#[utoipa::path(
    get,
    path = "/api/v1/polls/current",
    tag = "Polls",
    summary = "Get the current week's poll",
    responses(
        (status = 200, description = "Poll detail with tally", body = PollDetailResponse),
        (status = 404, description = "No poll this week", body = ErrorResponse),
    )
)]
pub async fn current_poll(State(state): State<AppState>) -> Result<impl IntoResponse, PollError> {
    let poll = state.poll_service.current_poll().await?;
    Ok(Json(PollDetailResponse::from(&poll)))
}

/// `GET /polls/{key}` — Poll detail with tally.
///
/// # Errors
///
/// Returns [`PollError::NotFound`] when the poll does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/polls/{key}",
    tag = "Polls",
    summary = "Get poll details",
    description = "Returns question, options, open flag, and the tally for one poll.",
    params(
        ("key" = String, Path, description = "Poll key, e.g. lunch_32"),
    ),
    responses(
        (status = 200, description = "Poll detail with tally", body = PollDetailResponse),
        (status = 404, description = "Poll not found", body = ErrorResponse),
    )
)]
pub async fn get_poll(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, PollError> {
    let poll = state.poll_service.find_poll(&PollKey::new(key)).await?;
    Ok(Json(PollDetailResponse::from(&poll)))
}

/// `GET /polls/{key}/tally` — Vote counts grouped by option value.
///
/// # Errors
///
/// Returns [`PollError::NotFound`] when the poll does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/polls/{key}/tally",
    tag = "Polls",
    summary = "Get the tally",
    params(
        ("key" = String, Path, description = "Poll key, e.g. lunch_32"),
    ),
    responses(
        (status = 200, description = "Vote counts by option value", body = TallyResponse),
        (status = 404, description = "Poll not found", body = ErrorResponse),
    )
)]
pub async fn get_tally(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, PollError> {
    let key = PollKey::new(key);
    let counts = state.poll_service.tally(&key).await?;
    Ok(Json(TallyResponse {
        key: key.to_string(),
        counts,
    }))
}

/// `POST /polls/{key}/close` — Close voting.
///
/// Idempotent: closing an already-closed poll succeeds.
///
/// # Errors
///
/// Returns [`PollError::NotFound`] when the poll does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/polls/{key}/close",
    tag = "Polls",
    summary = "Close voting on a poll",
    description = "Sets the poll's open flag to false. There is no reopen path.",
    params(
        ("key" = String, Path, description = "Poll key, e.g. lunch_32"),
    ),
    responses(
        (status = 200, description = "Poll closed", body = PollResponse),
        (status = 404, description = "Poll not found", body = ErrorResponse),
    )
)]
pub async fn close_poll(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, PollError> {
    let poll = state.poll_service.close_poll(&PollKey::new(key)).await?;
    Ok(Json(PollResponse::from(&poll)))
}

/// Poll management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/polls", post(create_poll).get(list_polls))
        .route("/polls/current", get(current_poll))
        .route("/polls/{key}", get(get_poll))
        .route("/polls/{key}/tally", get(get_tally))
        .route("/polls/{key}/close", post(close_poll))
}
