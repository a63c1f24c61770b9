use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use slackguard_core::{InboundEvent, Outcome};
use tracing::{debug, error};

use super::AppState;
use crate::error::ServerError;

/// `POST {events_path}` -- Slack event subscription callback.
///
/// Ignored events are acknowledged with `{}`, handshakes echo the challenge,
/// and processed events return an empty 200. Failures after validation
/// return 500 so they show up in Slack's delivery reporting.
pub async fn slack_events(
    State(state): State<AppState>,
    Json(event): Json<InboundEvent>,
) -> Result<Response, ServerError> {
    let outcome = state.handler.handle(&event).await.map_err(|e| {
        error!(error = %e, kind = e.kind(), "event handling failed");
        ServerError::from(e)
    })?;

    match &outcome {
        Outcome::Removed { file_id, channel } => {
            debug!(file_id = %file_id, channel = %channel, "flagged file removed");
        }
        other => debug!(outcome = ?other, "event handled"),
    }

    Ok(match outcome.response_body() {
        Some(body) => Json(body).into_response(),
        None => StatusCode::OK.into_response(),
    })
}
