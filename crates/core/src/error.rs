use thiserror::Error;

/// Errors that abort the handling of a single event.
///
/// Ignorable events never produce one of these; they resolve to
/// [`Outcome::Ignored`](crate::Outcome::Ignored) instead.
#[derive(Debug, Error)]
pub enum ModerationError {
    /// The image could not be downloaded from Slack.
    #[error("download failed: {0}")]
    Download(String),

    /// The moderation service could not classify the image.
    #[error("classification failed: {0}")]
    Classification(String),

    /// A Slack Web API mutation (`files.delete`, `chat.postMessage`) failed.
    #[error("{operation} failed: {message}")]
    PlatformMutation {
        /// Slack API method that failed.
        operation: &'static str,
        message: String,
    },
}

impl ModerationError {
    /// Short, stable name of the error kind for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Download(_) => "download_failed",
            Self::Classification(_) => "classification_failed",
            Self::PlatformMutation { .. } => "platform_mutation_failed",
        }
    }
}
