use bytes::{Bytes, BytesMut};
use reqwest::{Client, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use slackguard_core::{ImageFetcher, ModerationError, PlatformMutator};
use tracing::{debug, instrument, warn};

use crate::config::SlackConfig;
use crate::error::SlackError;
use crate::types::{
    ChatPostMessageForm, FilesDeleteForm, SlackApiResponse, SlackAuthTestResponse,
};

/// Client for the handful of Slack endpoints the moderation flow touches:
/// private file downloads, `files.delete`, `chat.postMessage` and `auth.test`.
pub struct SlackClient {
    config: SlackConfig,
    client: Client,
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SlackClient {
    /// Create a new client with a `reqwest::Client` honoring the configured
    /// timeout.
    pub fn new(config: SlackConfig) -> Result<Self, SlackError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Create a new client with a custom HTTP client.
    pub fn with_client(config: SlackConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/{method}", self.config.api_base_url)
    }

    fn token(&self) -> &str {
        self.config.token.expose_secret().as_str()
    }

    /// Download a file from its `url_private`, authenticating with the access
    /// token as a bearer token.
    ///
    /// The body is read chunk by chunk and abandoned as soon as it passes
    /// `max_download_bytes`; a larger `Content-Length` fails before any read.
    #[instrument(skip(self, url))]
    pub async fn download_file(&self, url: &str) -> Result<Bytes, SlackError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(self.token())
            .send()
            .await?;

        let mut response = check_status(response).await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        if content_type.starts_with("text/html") {
            warn!(content_type = %content_type, "download returned a web page instead of the file");
            return Err(SlackError::UnexpectedContent(content_type));
        }

        let limit = self.config.max_download_bytes;
        if let Some(length) = response.content_length()
            && length > limit
        {
            warn!(content_length = length, limit, "download exceeds size limit");
            return Err(SlackError::TooLarge { limit });
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await? {
            let received = u64::try_from(body.len() + chunk.len()).unwrap_or(u64::MAX);
            if received > limit {
                warn!(received, limit, "download exceeds size limit");
                return Err(SlackError::TooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        debug!(bytes = body.len(), "downloaded file");
        Ok(body.freeze())
    }

    /// Call `files.delete` for the given file.
    #[instrument(skip(self))]
    pub async fn files_delete(&self, file_id: &str) -> Result<(), SlackError> {
        let form = FilesDeleteForm {
            token: self.token(),
            file: file_id,
        };
        self.call_form("files.delete", &form).await
    }

    /// Call `chat.postMessage` with a plain-text message.
    #[instrument(skip(self, text))]
    pub async fn chat_post_message(&self, channel: &str, text: &str) -> Result<(), SlackError> {
        let form = ChatPostMessageForm {
            token: self.token(),
            channel,
            text,
        };
        self.call_form("chat.postMessage", &form).await
    }

    /// Call `auth.test` to check that the access token is valid.
    #[instrument(skip(self))]
    pub async fn auth_test(&self) -> Result<SlackAuthTestResponse, SlackError> {
        let response = self
            .client
            .post(self.api_url("auth.test"))
            .bearer_auth(self.token())
            .send()
            .await?;

        let auth: SlackAuthTestResponse = check_status(response).await?.json().await?;
        if !auth.ok {
            return Err(SlackError::Api(
                auth.error.unwrap_or_else(|| "unknown_error".to_owned()),
            ));
        }

        debug!(
            user_id = auth.user_id.as_deref().unwrap_or("unknown"),
            team_id = auth.team_id.as_deref().unwrap_or("unknown"),
            "Slack auth.test passed"
        );
        Ok(auth)
    }

    /// Send a form-encoded POST to a Web API method.
    ///
    /// Only transport failures, 429 and non-2xx statuses are errors. The
    /// `ok`/`error` envelope is logged but does not fail the call, and a body
    /// that is not an envelope at all is accepted.
    async fn call_form<T: Serialize + ?Sized>(
        &self,
        method: &str,
        form: &T,
    ) -> Result<(), SlackError> {
        debug!(method, "calling Slack Web API");

        let response = self
            .client
            .post(self.api_url(method))
            .form(form)
            .send()
            .await?;
        let body = check_status(response).await?.bytes().await?;

        match serde_json::from_slice::<SlackApiResponse>(&body) {
            Ok(envelope) if !envelope.ok => {
                warn!(
                    method,
                    error = envelope.error.as_deref().unwrap_or("unknown_error"),
                    "Slack API reported a failure"
                );
            }
            Ok(envelope) => {
                if let Some(warning) = &envelope.warning {
                    debug!(method, warning = %warning, "Slack API returned a warning");
                }
            }
            Err(_) => debug!(method, bytes = body.len(), "response is not a Web API envelope"),
        }

        Ok(())
    }
}

/// Map rate limiting and non-2xx statuses to errors.
async fn check_status(response: Response) -> Result<Response, SlackError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        warn!("Slack API rate limit hit");
        return Err(SlackError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SlackError::Api(format!("HTTP {status}: {body}")));
    }

    Ok(response)
}

impl ImageFetcher for SlackClient {
    async fn fetch_image(&self, url: &str) -> Result<Bytes, ModerationError> {
        self.download_file(url)
            .await
            .map_err(SlackError::into_download)
    }
}

impl PlatformMutator for SlackClient {
    async fn delete_file(&self, file_id: &str) -> Result<(), ModerationError> {
        self.files_delete(file_id)
            .await
            .map_err(|e| e.into_mutation("files.delete"))
    }

    async fn post_message(&self, channel: &str, text: &str) -> Result<(), ModerationError> {
        self.chat_post_message(channel, text)
            .await
            .map_err(|e| e.into_mutation("chat.postMessage"))
    }
}
