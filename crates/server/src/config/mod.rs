mod server;
mod slack;
mod telemetry;


pub use server::*;
pub use slack::*;
pub use telemetry::*;

use serde::Deserialize;
use slackguard_aws::RekognitionConfig;

/// Top-level service configuration, loaded from a TOML file.
///
/// Secrets and moderation parameters are not part of this file; they come from
/// the environment via [`slackguard_core::ModerationConfig::from_env`].
#[derive(Debug, Default, Deserialize)]
pub struct ServiceConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Slack Web API settings.
    #[serde(default)]
    pub slack: SlackSection,
    /// AWS settings for the Rekognition client.
    #[serde(default)]
    pub aws: RekognitionConfig,
    /// `OpenTelemetry` tracing configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
