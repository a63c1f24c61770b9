use serde::Deserialize;

/// Event-subscription callback delivered by Slack.
///
/// Only the fields the moderation flow reads are modelled; everything else in
/// the envelope is ignored during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundEvent {
    /// Verification token shared between Slack and this app.
    #[serde(default)]
    pub token: String,

    /// Present only on the `url_verification` handshake.
    #[serde(default)]
    pub challenge: Option<String>,

    /// The inner event. Absent on handshakes.
    #[serde(default)]
    pub event: Option<EventDetails>,
}

/// Inner `event` object of an event callback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventDetails {
    #[serde(default)]
    pub subtype: Option<String>,

    /// Channel the file was shared in.
    #[serde(default)]
    pub channel: Option<String>,

    #[serde(default)]
    pub file: Option<SharedFile>,
}

/// File metadata attached to a `file_share` message.
#[derive(Debug, Clone, Deserialize)]
pub struct SharedFile {
    pub id: String,
    pub mimetype: String,
    /// Size in bytes as reported by Slack.
    pub size: u64,
    /// Private download URL; requires a bearer token.
    pub url_private: String,
}
