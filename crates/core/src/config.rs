use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Image types accepted by the moderation service.
pub const SUPPORTED_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Largest image, in bytes, the moderation service accepts inline (5 MiB).
pub const MAX_IMAGE_BYTES: u64 = 5_242_880;

/// Environment variable holding the Slack verification token.
pub const VERIFICATION_TOKEN_VAR: &str = "VERIFICATION_TOKEN";
/// Environment variable holding the Slack OAuth access token.
pub const ACCESS_TOKEN_VAR: &str = "ACCESS_TOKEN";
/// Environment variable holding the minimum label confidence.
pub const MIN_CONFIDENCE_VAR: &str = "MIN_CONFIDENCE";

/// Errors raised while loading [`ModerationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Process-wide moderation settings.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct ModerationConfig {
    verification_token: SecretString,
    access_token: SecretString,
    /// Minimum label confidence, in percent (0 to 100).
    pub min_confidence: f32,
    /// MIME types eligible for moderation.
    pub supported_types: Vec<String>,
    /// Largest file size, in bytes, eligible for moderation.
    pub max_size: u64,
}

impl std::fmt::Debug for ModerationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModerationConfig")
            .field("verification_token", &"[REDACTED]")
            .field("access_token", &"[REDACTED]")
            .field("min_confidence", &self.min_confidence)
            .field("supported_types", &self.supported_types)
            .field("max_size", &self.max_size)
            .finish()
    }
}

impl ModerationConfig {
    /// Create a configuration with the default supported types and size limit.
    pub fn new(
        verification_token: impl Into<String>,
        access_token: impl Into<String>,
        min_confidence: f32,
    ) -> Self {
        Self {
            verification_token: SecretString::new(verification_token.into()),
            access_token: SecretString::new(access_token.into()),
            min_confidence,
            supported_types: SUPPORTED_TYPES.iter().map(|t| (*t).to_owned()).collect(),
            max_size: MAX_IMAGE_BYTES,
        }
    }

    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| -> Result<String, ConfigError> {
            match lookup(var) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(ConfigError::Missing(var)),
            }
        };

        let verification_token = required(VERIFICATION_TOKEN_VAR)?;
        let access_token = required(ACCESS_TOKEN_VAR)?;
        let raw_confidence = required(MIN_CONFIDENCE_VAR)?;

        let min_confidence: f32 =
            raw_confidence
                .trim()
                .parse()
                .map_err(|e: std::num::ParseFloatError| ConfigError::Invalid {
                    var: MIN_CONFIDENCE_VAR,
                    reason: e.to_string(),
                })?;

        if !min_confidence.is_finite() || !(0.0..=100.0).contains(&min_confidence) {
            return Err(ConfigError::Invalid {
                var: MIN_CONFIDENCE_VAR,
                reason: format!("{min_confidence} is outside 0..=100"),
            });
        }

        Ok(Self::new(verification_token, access_token, min_confidence))
    }

    /// Override the accepted MIME types.
    #[must_use]
    pub fn with_supported_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Override the size limit.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Compare a presented token with the verification token in constant time.
    pub fn token_matches(&self, presented: &str) -> bool {
        let expected = self.verification_token.expose_secret().as_bytes();
        expected.ct_eq(presented.as_bytes()).into()
    }

    /// The Slack OAuth access token.
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// Whether the given MIME type is eligible for moderation.
    pub fn supports(&self, mimetype: &str) -> bool {
        self.supported_types.iter().any(|t| t == mimetype)
    }
}
