use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Span, error, info, instrument};

use crate::config::ModerationConfig;
use crate::error::ModerationError;
use crate::event::InboundEvent;
use crate::outcome::{Outcome, Validation};
use crate::provider::{ImageFetcher, ModerationClassifier, PlatformMutator};
use crate::validator::validate;

/// Message posted to the channel after a flagged file is deleted.
pub const REMOVAL_NOTICE: &str =
    "File removed due to displaying explicit or suggestive adult content.";

/// Runs one inbound event through validation, download, classification and,
/// for flagged images, deletion and channel notification.
///
/// The steps run strictly in sequence. The first error aborts the event and is
/// returned to the caller; nothing is retried.
pub struct ModerationHandler<F, C, M> {
    config: Arc<ModerationConfig>,
    fetcher: F,
    classifier: C,
    mutator: M,
}

impl<F, C, M> ModerationHandler<F, C, M>
where
    F: ImageFetcher,
    C: ModerationClassifier,
    M: PlatformMutator,
{
    pub fn new(config: Arc<ModerationConfig>, fetcher: F, classifier: C, mutator: M) -> Self {
        Self {
            config,
            fetcher,
            classifier,
            mutator,
        }
    }

    pub fn config(&self) -> &ModerationConfig {
        &self.config
    }

    /// Handle a single event.
    #[instrument(
        skip_all,
        fields(file_id = tracing::field::Empty, channel = tracing::field::Empty)
    )]
    pub async fn handle(&self, event: &InboundEvent) -> Result<Outcome, ModerationError> {
        let share = match validate(event, &self.config) {
            Validation::Ignored(reason) => return Ok(Outcome::Ignored(reason)),
            Validation::Handshake(challenge) => return Ok(Outcome::Handshake(challenge)),
            Validation::Accepted(share) => share,
        };

        let span = Span::current();
        span.record("file_id", share.file_id.as_str());
        span.record("channel", share.channel.as_str());

        info!("downloading image");
        let image = self.fetcher.fetch_image(&share.url_private).await?;

        info!(bytes = image.len(), "checking image for explicit content");
        let verdict = self
            .classifier
            .classify(image, self.config.min_confidence)
            .await?;

        if !verdict.is_explicit() {
            info!("no moderation labels detected");
            return Ok(Outcome::Clean {
                file_id: share.file_id,
            });
        }

        info!(
            labels = ?verdict.label_names(),
            "image displays explicit content, deleting file"
        );
        self.mutator.delete_file(&share.file_id).await?;

        info!("posting removal notice to channel");
        if let Err(e) = self
            .mutator
            .post_message(&share.channel, REMOVAL_NOTICE)
            .await
        {
            error!(error = %e, "file was deleted but the channel was not notified");
            return Err(e);
        }

        Ok(Outcome::Removed {
            file_id: share.file_id,
            channel: share.channel,
        })
    }
}

/// Object-safe view of a moderation handler, for use behind
/// `Arc<dyn EventHandler>`.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &InboundEvent) -> Result<Outcome, ModerationError>;
}

#[async_trait]
impl<F, C, M> EventHandler for ModerationHandler<F, C, M>
where
    F: ImageFetcher,
    C: ModerationClassifier,
    M: PlatformMutator,
{
    async fn handle(&self, event: &InboundEvent) -> Result<Outcome, ModerationError> {
        ModerationHandler::handle(self, event).await
    }
}
