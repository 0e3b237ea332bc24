//! lunchpoll server entry point.
//!
//! Starts the Axum HTTP server and wires the store and broadcaster into
//! the poll service.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use lunchpoll::api;
use lunchpoll::app_state::AppState;
use lunchpoll::broadcast::{Broadcaster, NoopBroadcaster, SlackClient};
use lunchpoll::config::LunchConfig;
use lunchpoll::persistence::SqliteStore;
use lunchpoll::service::PollService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = LunchConfig::from_env().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    tracing::info!(addr = %config.listen_addr, "starting lunchpoll");

    // Open the poll store; failure here aborts startup.
    let store = SqliteStore::connect(&config.database_url).await?;
    tracing::info!(url = %config.database_url, "poll store ready");

    // Pick the broadcaster
    let broadcaster: Arc<dyn Broadcaster> =
        if config.broadcast_enabled && !config.slack_token.is_empty() {
            Arc::new(SlackClient::new(config.slack_token.clone()))
        } else {
            tracing::warn!("no slack token or broadcasting disabled, announcements are off");
            Arc::new(NoopBroadcaster)
        };

    // Build service layer
    let poll_service = Arc::new(PollService::new(
        Arc::new(store),
        broadcaster,
        config.slack_channel.clone(),
        config.announcement.clone(),
    ));

    // Build application state
    let app_state = AppState { poll_service };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    #[cfg(feature = "swagger-ui")]
    let app = app.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", <api::ApiDoc as utoipa::OpenApi>::openapi()),
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
