use aws_config::{ConfigLoader, Region, SdkConfig};
use tracing::{debug, info};

use crate::config::RekognitionConfig;

/// STS session name used when `role_arn` is set.
pub const SESSION_NAME: &str = "slackguard-moderation";

fn loader(config: &RekognitionConfig) -> ConfigLoader {
    let loader = aws_config::from_env().region(Region::new(config.region.clone()));
    match &config.endpoint_url {
        Some(endpoint) => loader.endpoint_url(endpoint),
        None => loader,
    }
}

/// Load the SDK configuration for the Rekognition client.
///
/// Base credentials come from the environment chain. With `role_arn` set they
/// are only used to assume that role, and the assumed-role credentials
/// (refreshed before expiry) sign the Rekognition calls.
pub async fn build_sdk_config(config: &RekognitionConfig) -> SdkConfig {
    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom AWS endpoint");
    }

    let base = loader(config).load().await;

    let Some(role_arn) = &config.role_arn else {
        return base;
    };

    info!(role_arn = %role_arn, session_name = SESSION_NAME, "assuming IAM role via STS");

    let assume_role = aws_config::sts::AssumeRoleProvider::builder(role_arn)
        .session_name(SESSION_NAME)
        .region(Region::new(config.region.clone()))
        .configure(&base)
        .build()
        .await;

    loader(config)
        .credentials_provider(assume_role)
        .load()
        .await
}

#[cfg(all(test, feature = "integration"))]
mod integration_tests {
    use super::*;

    // Loading needs system root certificates, so these only run with the
    // `integration` feature.

    #[tokio::test]
    async fn region_is_applied() {
        let sdk_config = build_sdk_config(&RekognitionConfig::new("ap-northeast-1")).await;
        assert_eq!(
            sdk_config.region().map(|r| r.as_ref()),
            Some("ap-northeast-1")
        );
    }

    #[tokio::test]
    async fn endpoint_override_is_applied() {
        let config = RekognitionConfig::new("us-west-2").with_endpoint_url("http://localhost:4566");
        let sdk_config = build_sdk_config(&config).await;
        assert_eq!(sdk_config.endpoint_url(), Some("http://localhost:4566"));
    }
}
