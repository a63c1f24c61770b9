use serde::Deserialize;

/// HTTP server bind configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path Slack's event subscription posts to.
    #[serde(default = "default_events_path")]
    pub events_path: String,
    /// Graceful shutdown timeout in seconds.
    ///
    /// In-flight moderation requests get this long to finish after a
    /// shutdown signal.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            events_path: default_events_path(),
            shutdown_timeout_seconds: default_shutdown_timeout(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8080
}

fn default_events_path() -> String {
    "/slack/events".to_owned()
}

fn default_shutdown_timeout() -> u64 {
    30
}
