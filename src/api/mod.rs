//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All endpoints are mounted under `/api/v1` except `/health`.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

/// OpenAPI document for the service, served by Swagger UI when the
/// `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        handlers::poll::create_poll,
        handlers::poll::list_polls,
        handlers::poll::current_poll,
        handlers::poll::get_poll,
        handlers::poll::get_tally,
        handlers::poll::close_poll,
        handlers::vote::vote_handler,
        handlers::system::health_handler,
    ),
    components(schemas(
        dto::CreatePollRequest,
        dto::OptionDto,
        dto::PollResponse,
        dto::PollDetailResponse,
        dto::PollSummaryDto,
        dto::PollListResponse,
        dto::TallyResponse,
        dto::VoteCallbackForm,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "Polls", description = "Weekly poll lifecycle"),
        (name = "Votes", description = "Slack interactive vote callback"),
        (name = "System", description = "Health and metadata"),
    )
)]
pub struct ApiDoc;
