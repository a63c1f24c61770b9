use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use slackguard_core::ModerationError;
use thiserror::Error;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Handling the event failed after validation passed.
    #[error(transparent)]
    Moderation(#[from] ModerationError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::Moderation(e) => {
                serde_json::json!({ "error": e.to_string(), "kind": e.kind() })
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn moderation_error_is_500_with_kind() {
        let err = ServerError::from(ModerationError::Download("HTTP 403".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["kind"], "download_failed");
        assert_eq!(json["error"], "download failed: HTTP 403");
    }
}
