use std::fmt;

use serde::Deserialize;

/// Transport used to ship spans to the collector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtlpProtocol {
    #[default]
    Grpc,
    Http,
}

impl fmt::Display for OtlpProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Grpc => "grpc",
            Self::Http => "http",
        })
    }
}

/// `[telemetry]`: optional OTLP export of the moderation spans.
///
/// ```toml
/// [telemetry]
/// enabled = true
/// endpoint = "http://otel-collector:4317"
/// protocol = "grpc"
/// sample_ratio = 0.5
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub protocol: OtlpProtocol,
    /// Fraction of events traced, 0.0 to 1.0.
    #[serde(default = "default_sample_ratio")]
    pub sample_ratio: f64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            protocol: OtlpProtocol::Grpc,
            sample_ratio: default_sample_ratio(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:4317".to_owned()
}

fn default_sample_ratio() -> f64 {
    1.0
}
