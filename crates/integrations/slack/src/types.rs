use serde::{Deserialize, Serialize};

/// Common envelope of Slack Web API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub warning: Option<String>,
}

/// Response of `auth.test`.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackAuthTestResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub team_id: Option<String>,
}

/// Form body of `files.delete`.
#[derive(Debug, Serialize)]
pub struct FilesDeleteForm<'a> {
    pub token: &'a str,
    pub file: &'a str,
}

/// Form body of `chat.postMessage`.
#[derive(Debug, Serialize)]
pub struct ChatPostMessageForm<'a> {
    pub token: &'a str,
    pub channel: &'a str,
    pub text: &'a str,
}
