use std::fmt;

use serde::Serialize;

/// Why an event was dropped without any outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The presented verification token did not match.
    InvalidToken,
    /// The inner event is not a `file_share` message.
    NotFileShare,
    /// The shared file's MIME type is not supported by the moderation service.
    UnsupportedType,
    /// The shared file exceeds the size limit.
    TooLarge,
    /// A `file_share` event without the channel or file fields.
    MalformedEvent,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidToken => "invalid_token",
            Self::NotFileShare => "not_file_share",
            Self::UnsupportedType => "unsupported_type",
            Self::TooLarge => "too_large",
            Self::MalformedEvent => "malformed_event",
        };
        f.write_str(s)
    }
}

/// A validated `file_share` event, ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileShare {
    pub file_id: String,
    pub channel: String,
    pub url_private: String,
}

/// Result of validating an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// Drop the event silently.
    Ignored(IgnoreReason),
    /// Echo the URL-verification challenge.
    Handshake(String),
    /// Proceed with moderation.
    Accepted(FileShare),
}

/// Result of handling one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Event dropped before any outbound call.
    Ignored(IgnoreReason),
    /// URL-verification handshake answered.
    Handshake(String),
    /// Image classified and found clean.
    Clean { file_id: String },
    /// Image flagged, deleted and the channel notified.
    Removed { file_id: String, channel: String },
}

impl Outcome {
    /// JSON body to return to Slack, if any.
    ///
    /// Ignored events are acknowledged with `{}`; processed events return no
    /// body at all.
    pub fn response_body(&self) -> Option<serde_json::Value> {
        match self {
            Self::Ignored(_) => Some(serde_json::json!({})),
            Self::Handshake(challenge) => Some(serde_json::json!({ "challenge": challenge })),
            Self::Clean { .. } | Self::Removed { .. } => None,
        }
    }
}
