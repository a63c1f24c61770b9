use slackguard_core::ModerationError;
use thiserror::Error;

/// Errors specific to the Slack client.
///
/// These are internal errors that get converted into [`ModerationError`] at
/// the trait boundary, tagged with the step that failed.
#[derive(Debug, Error)]
pub enum SlackError {
    /// An HTTP-level transport error occurred.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Slack answered with a non-success status, or `auth.test` reported
    /// `ok: false`.
    #[error("Slack API error: {0}")]
    Api(String),

    /// A file download returned something other than the file, typically the
    /// HTML sign-in page when the token lacks the `files:read` scope.
    #[error("unexpected content type: {0}")]
    UnexpectedContent(String),

    /// A download exceeded the configured size limit.
    #[error("file is larger than {limit} bytes")]
    TooLarge { limit: u64 },

    /// The client received an HTTP 429 (Too Many Requests) response.
    #[error("rate limited by Slack")]
    RateLimited,
}

impl SlackError {
    /// Convert into the error for a failed download.
    pub fn into_download(self) -> ModerationError {
        ModerationError::Download(self.to_string())
    }

    /// Convert into the error for a failed Web API mutation.
    pub fn into_mutation(self, operation: &'static str) -> ModerationError {
        ModerationError::PlatformMutation {
            operation,
            message: self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_maps_to_download() {
        let err = SlackError::RateLimited.into_download();
        assert!(matches!(err, ModerationError::Download(ref msg) if msg == "rate limited by Slack"));
    }

    #[test]
    fn api_error_maps_to_mutation() {
        let err = SlackError::Api("file_not_found".into()).into_mutation("files.delete");
        assert_eq!(
            err.to_string(),
            "files.delete failed: Slack API error: file_not_found"
        );
    }

    #[test]
    fn too_large_maps_to_download() {
        let err = SlackError::TooLarge { limit: 5_242_880 }.into_download();
        assert_eq!(
            err.to_string(),
            "download failed: file is larger than 5242880 bytes"
        );
    }

    #[test]
    fn unexpected_content_display() {
        let err = SlackError::UnexpectedContent("text/html".into());
        assert_eq!(err.to_string(), "unexpected content type: text/html");
    }
}
