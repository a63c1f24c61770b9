use serde::Deserialize;

/// Slack Web API settings. The access token itself comes from the
/// environment, never from this file.
#[derive(Debug, Deserialize)]
pub struct SlackSection {
    /// Base URL of the Slack Web API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Call `auth.test` at startup and log the workspace the token belongs to.
    #[serde(default = "default_verify_on_startup")]
    pub verify_on_startup: bool,
}

impl Default for SlackSection {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_seconds: default_timeout(),
            verify_on_startup: default_verify_on_startup(),
        }
    }
}

fn default_api_base_url() -> String {
    slackguard_slack::config::DEFAULT_API_BASE_URL.to_owned()
}

fn default_timeout() -> u64 {
    30
}

fn default_verify_on_startup() -> bool {
    true
}
