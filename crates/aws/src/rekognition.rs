use aws_sdk_rekognition::error::DisplayErrorContext;
use aws_sdk_rekognition::primitives::Blob;
use aws_sdk_rekognition::types::{Image, ModerationLabel as SdkModerationLabel};
use bytes::Bytes;
use slackguard_core::{ModerationClassifier, ModerationError, ModerationLabel, ModerationVerdict};
use tracing::{debug, error, instrument};

use crate::auth::build_sdk_config;
use crate::config::RekognitionConfig;
use crate::error::classify_sdk_error;

/// Classifies images with Amazon Rekognition `DetectModerationLabels`.
pub struct RekognitionClassifier {
    client: aws_sdk_rekognition::Client,
}

impl std::fmt::Debug for RekognitionClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RekognitionClassifier")
            .field("client", &"<RekognitionClient>")
            .finish()
    }
}

impl RekognitionClassifier {
    /// Create a classifier by building an AWS SDK client.
    pub async fn new(config: &RekognitionConfig) -> Self {
        let sdk_config = build_sdk_config(config).await;
        let client = aws_sdk_rekognition::Client::new(&sdk_config);
        Self { client }
    }

    /// Create a classifier with a pre-built client (for testing).
    pub fn with_client(client: aws_sdk_rekognition::Client) -> Self {
        Self { client }
    }
}

impl ModerationClassifier for RekognitionClassifier {
    #[instrument(skip(self, image), fields(bytes = image.len()))]
    async fn classify(
        &self,
        image: Bytes,
        min_confidence: f32,
    ) -> Result<ModerationVerdict, ModerationError> {
        debug!(min_confidence, "calling DetectModerationLabels");

        let output = self
            .client
            .detect_moderation_labels()
            .image(Image::builder().bytes(Blob::new(image.to_vec())).build())
            .min_confidence(min_confidence)
            .send()
            .await
            .map_err(|e| {
                let err = classify_sdk_error(&e);
                error!(error = %DisplayErrorContext(&e), "unable to detect labels for image");
                ModerationError::from(err)
            })?;

        let verdict = ModerationVerdict::new(convert_labels(output.moderation_labels()));
        debug!(label_count = verdict.labels.len(), "moderation labels received");
        Ok(verdict)
    }
}

/// Convert SDK labels into the crate-neutral label type.
fn convert_labels(labels: &[SdkModerationLabel]) -> Vec<ModerationLabel> {
    labels
        .iter()
        .map(|label| ModerationLabel {
            name: label.name().unwrap_or_default().to_owned(),
            parent_name: label
                .parent_name()
                .filter(|p| !p.is_empty())
                .map(ToOwned::to_owned),
            confidence: label.confidence().unwrap_or_default(),
        })
        .collect()
}
