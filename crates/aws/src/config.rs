use serde::Deserialize;

/// `[aws]`: where and as whom the Rekognition client runs.
///
/// Credentials always come from the SDK's environment chain; `role_arn` only
/// adds an STS assume-role step on top of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RekognitionConfig {
    #[serde(default = "default_region")]
    pub region: String,

    /// Role to assume before calling Rekognition.
    #[serde(default)]
    pub role_arn: Option<String>,

    /// Endpoint override, e.g. a `LocalStack` URL.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

fn default_region() -> String {
    "us-east-1".to_owned()
}

impl Default for RekognitionConfig {
    fn default() -> Self {
        Self::new(default_region())
    }
}

impl RekognitionConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            role_arn: None,
            endpoint_url: None,
        }
    }

    #[must_use]
    pub fn with_role_arn(mut self, role_arn: impl Into<String>) -> Self {
        self.role_arn = Some(role_arn.into());
        self
    }

    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}
