use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{self, Request, StatusCode};
use bytes::Bytes;
use tower::ServiceExt;

use slackguard_core::{
    ImageFetcher, ModerationClassifier, ModerationConfig, ModerationError, ModerationHandler,
    ModerationLabel, ModerationVerdict, PlatformMutator, REMOVAL_NOTICE,
};
use slackguard_server::api::{AppState, router};

// -- Fakes ----------------------------------------------------------------

type Calls = Arc<Mutex<Vec<String>>>;

struct FakeSlack {
    calls: Calls,
}

impl ImageFetcher for FakeSlack {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, ModerationError> {
        self.calls.lock().unwrap().push(format!("fetch {url}"));
        Ok(Bytes::from_static(b"jpeg-bytes"))
    }
}

impl PlatformMutator for FakeSlack {
    async fn delete_file(&self, file_id: &str) -> Result<(), ModerationError> {
        self.calls.lock().unwrap().push(format!("delete {file_id}"));
        Ok(())
    }

    async fn post_message(&self, channel: &str, text: &str) -> Result<(), ModerationError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("post {channel} {text}"));
        Ok(())
    }
}

enum Verdict {
    Clean,
    Explicit,
    Fail,
}

struct FakeClassifier {
    calls: Calls,
    verdict: Verdict,
}

impl ModerationClassifier for FakeClassifier {
    async fn classify(
        &self,
        _image: Bytes,
        min_confidence: f32,
    ) -> Result<ModerationVerdict, ModerationError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("classify {min_confidence}"));
        match self.verdict {
            Verdict::Clean => Ok(ModerationVerdict::default()),
            Verdict::Explicit => Ok(ModerationVerdict::new(vec![ModerationLabel {
                name: "Suggestive".into(),
                parent_name: None,
                confidence: 88.0,
            }])),
            Verdict::Fail => Err(ModerationError::Classification(
                "AWS service error: InvalidImageFormatException".into(),
            )),
        }
    }
}

// -- Helpers --------------------------------------------------------------

fn build_app(verdict: Verdict) -> (axum::Router, Calls) {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let slack = Arc::new(FakeSlack {
        calls: Arc::clone(&calls),
    });
    let handler = ModerationHandler::new(
        Arc::new(ModerationConfig::new("verif-token", "xoxb-access", 50.0)),
        Arc::clone(&slack),
        FakeClassifier {
            calls: Arc::clone(&calls),
            verdict,
        },
        slack,
    );
    let state = AppState {
        handler: Arc::new(handler),
    };
    (router(state, "/slack/events"), calls)
}

fn file_share(token: &str, mimetype: &str) -> serde_json::Value {
    serde_json::json!({
        "token": token,
        "type": "event_callback",
        "event": {
            "type": "message",
            "subtype": "file_share",
            "channel": "C0GENERAL",
            "file": {
                "id": "F0PHOTO",
                "mimetype": mimetype,
                "size": 48_213,
                "url_private": "https://files.slack.com/files-pri/T0-F0PHOTO/photo.jpg"
            }
        }
    })
}

async fn post_event(app: axum::Router, payload: &serde_json::Value) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method(http::Method::POST)
                .uri("/slack/events")
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

// -- Tests ----------------------------------------------------------------

#[tokio::test]
async fn health_endpoint() {
    let (app, _calls) = build_app(Verdict::Clean);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn url_verification_echoes_challenge() {
    let (app, calls) = build_app(Verdict::Clean);
    let payload = serde_json::json!({
        "token": "verif-token",
        "challenge": "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P",
        "type": "url_verification"
    });

    let (status, body) = post_event(app, &payload).await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"challenge": "3eZbrw1aBm2rZgRNFdxV2595E9CY3gmdALWMmHkvFXO7tYXAYM8P"})
    );
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn forged_token_is_acknowledged_and_dropped() {
    let (app, calls) = build_app(Verdict::Explicit);

    let (status, body) = post_event(app, &file_share("forged", "image/jpeg")).await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({}));
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unsupported_type_is_acknowledged_and_dropped() {
    let (app, calls) = build_app(Verdict::Explicit);

    let (status, body) = post_event(app, &file_share("verif-token", "image/gif")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"{}");
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn clean_image_returns_empty_body() {
    let (app, calls) = build_app(Verdict::Clean);

    let (status, body) = post_event(app, &file_share("verif-token", "image/jpeg")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            "fetch https://files.slack.com/files-pri/T0-F0PHOTO/photo.jpg".to_owned(),
            "classify 50".to_owned(),
        ]
    );
}

#[tokio::test]
async fn explicit_image_is_deleted_and_announced() {
    let (app, calls) = build_app(Verdict::Explicit);

    let (status, body) = post_event(app, &file_share("verif-token", "image/jpeg")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[2], "delete F0PHOTO");
    assert_eq!(calls[3], format!("post C0GENERAL {REMOVAL_NOTICE}"));
}

#[tokio::test]
async fn classification_failure_returns_500() {
    let (app, calls) = build_app(Verdict::Fail);

    let (status, body) = post_event(app, &file_share("verif-token", "image/png")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["kind"], "classification_failed");
    assert!(
        !calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.starts_with("delete") || c.starts_with("post"))
    );
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let (app, calls) = build_app(Verdict::Clean);

    let response = app
        .oneshot(
            Request::builder()
                .method(http::Method::POST)
                .uri("/slack/events")
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(calls.lock().unwrap().is_empty());
}
