pub mod events;
pub mod health;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use slackguard_core::EventHandler;
use tower_http::trace::TraceLayer;

/// Shared state for all API handlers.
#[derive(Clone)]
pub struct AppState {
    /// Runs one Slack event through the moderation pipeline.
    pub handler: Arc<dyn EventHandler>,
}

/// Build the router: the Slack event endpoint at `events_path` plus `/health`.
pub fn router(state: AppState, events_path: &str) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(events_path, post(events::slack_events))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
