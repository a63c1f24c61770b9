//! AWS integration for slackguard.
//!
//! Builds the SDK configuration (region, endpoint override, optional STS
//! assume-role) and provides [`RekognitionClassifier`], which classifies images
//! with Amazon Rekognition `DetectModerationLabels`.

pub mod auth;
pub mod config;
pub mod error;
pub mod rekognition;

pub use config::RekognitionConfig;
pub use error::AwsProviderError;
pub use rekognition::RekognitionClassifier;
