use std::time::Duration;

use secrecy::SecretString;
use slackguard_core::MAX_IMAGE_BYTES;

/// Default base URL of the Slack Web API.
pub const DEFAULT_API_BASE_URL: &str = "https://slack.com/api";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`SlackClient`](crate::SlackClient).
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Bot access token. Sent as the bearer token on downloads and as the
    /// `token` form field on Web API calls.
    pub token: SecretString,

    /// Web API base URL, without a trailing slash.
    pub api_base_url: String,

    pub timeout: Duration,

    /// Downloads larger than this are abandoned before the body is buffered.
    pub max_download_bytes: u64,
}

impl SlackConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            max_download_bytes: MAX_IMAGE_BYTES,
        }
    }

    /// Point the client at another Web API host, e.g. a local mock.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_owned();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_download_bytes(mut self, limit: u64) -> Self {
        self.max_download_bytes = limit;
        self
    }
}
