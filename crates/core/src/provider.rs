use std::sync::Arc;

use bytes::Bytes;

use crate::error::ModerationError;
use crate::verdict::ModerationVerdict;

/// Downloads a shared file from its private URL.
pub trait ImageFetcher: Send + Sync {
    /// Fetch the full file body. Any transport failure or non-2xx status is
    /// a [`ModerationError::Download`].
    fn fetch_image(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Bytes, ModerationError>> + Send;
}

/// Classifies image bytes with an external moderation service.
pub trait ModerationClassifier: Send + Sync {
    /// Return the labels detected at or above `min_confidence` (percent).
    fn classify(
        &self,
        image: Bytes,
        min_confidence: f32,
    ) -> impl std::future::Future<Output = Result<ModerationVerdict, ModerationError>> + Send;
}

/// Mutating calls against the messaging platform.
pub trait PlatformMutator: Send + Sync {
    /// Delete a shared file.
    fn delete_file(
        &self,
        file_id: &str,
    ) -> impl std::future::Future<Output = Result<(), ModerationError>> + Send;

    /// Post a plain-text message to a channel.
    fn post_message(
        &self,
        channel: &str,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), ModerationError>> + Send;
}

impl<T: ImageFetcher> ImageFetcher for Arc<T> {
    fn fetch_image(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Bytes, ModerationError>> + Send {
        (**self).fetch_image(url)
    }
}

impl<T: ModerationClassifier> ModerationClassifier for Arc<T> {
    fn classify(
        &self,
        image: Bytes,
        min_confidence: f32,
    ) -> impl std::future::Future<Output = Result<ModerationVerdict, ModerationError>> + Send {
        (**self).classify(image, min_confidence)
    }
}

impl<T: PlatformMutator> PlatformMutator for Arc<T> {
    fn delete_file(
        &self,
        file_id: &str,
    ) -> impl std::future::Future<Output = Result<(), ModerationError>> + Send {
        (**self).delete_file(file_id)
    }

    fn post_message(
        &self,
        channel: &str,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), ModerationError>> + Send {
        (**self).post_message(channel, text)
    }
}
