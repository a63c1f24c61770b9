use aws_sdk_rekognition::error::{DisplayErrorContext, SdkError};
use aws_sdk_rekognition::operation::detect_moderation_labels::DetectModerationLabelsError;
use slackguard_core::ModerationError;
use thiserror::Error;

/// Why a `DetectModerationLabels` call failed.
#[derive(Debug, Error)]
pub enum AwsProviderError {
    /// Rekognition refused the image itself (bad format or over the inline
    /// size limit). Retrying the same bytes will not help.
    #[error("image rejected by Rekognition: {0}")]
    RejectedImage(String),

    #[error("AWS request throttled")]
    Throttled,

    /// Any other service-side error.
    #[error("AWS service error: {0}")]
    ServiceError(String),

    #[error("AWS connection error: {0}")]
    Connection(String),

    #[error("AWS request timed out")]
    Timeout,
}

impl From<AwsProviderError> for ModerationError {
    fn from(err: AwsProviderError) -> Self {
        ModerationError::Classification(err.to_string())
    }
}

/// Map a failed `DetectModerationLabels` call onto [`AwsProviderError`].
pub fn classify_sdk_error(err: &SdkError<DetectModerationLabelsError>) -> AwsProviderError {
    match err {
        SdkError::ServiceError(context) => classify_service_error(context.err()),
        SdkError::TimeoutError(_) => AwsProviderError::Timeout,
        SdkError::DispatchFailure(failure) if failure.is_timeout() => AwsProviderError::Timeout,
        SdkError::DispatchFailure(_) => {
            AwsProviderError::Connection(DisplayErrorContext(err).to_string())
        }
        _ => AwsProviderError::ServiceError(DisplayErrorContext(err).to_string()),
    }
}

/// Map the modeled Rekognition exceptions.
pub fn classify_service_error(err: &DetectModerationLabelsError) -> AwsProviderError {
    match err {
        DetectModerationLabelsError::ThrottlingException(_)
        | DetectModerationLabelsError::ProvisionedThroughputExceededException(_) => {
            AwsProviderError::Throttled
        }
        DetectModerationLabelsError::InvalidImageFormatException(_)
        | DetectModerationLabelsError::ImageTooLargeException(_) => {
            AwsProviderError::RejectedImage(err.to_string())
        }
        other => AwsProviderError::ServiceError(DisplayErrorContext(other).to_string()),
    }
}
