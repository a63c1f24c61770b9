use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};

use slackguard_aws::RekognitionClassifier;
use slackguard_core::{ModerationConfig, ModerationHandler};
use slackguard_server::api::{self, AppState};
use slackguard_server::config::ServiceConfig;
use slackguard_slack::{SlackClient, SlackConfig};

/// Slack image moderation service.
#[derive(Parser, Debug)]
#[command(
    name = "slackguard",
    about = "Deletes explicit images shared in Slack, using Amazon Rekognition"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "slackguard.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let config_found = Path::new(&cli.config).exists();
    let config: ServiceConfig = if config_found {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        ServiceConfig::default()
    };

    let telemetry_guard = slackguard_server::telemetry::init(&config.telemetry);

    if !config_found {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    // Secrets and thresholds are required; a bad environment stops startup here.
    let moderation = ModerationConfig::from_env()?;
    info!(
        min_confidence = moderation.min_confidence,
        max_size = moderation.max_size,
        supported_types = ?moderation.supported_types,
        "moderation settings loaded"
    );

    let slack_config = SlackConfig::new(moderation.access_token())
        .with_api_base_url(&config.slack.api_base_url)
        .with_timeout(Duration::from_secs(config.slack.timeout_seconds))
        .with_max_download_bytes(moderation.max_size);
    let slack = Arc::new(SlackClient::new(slack_config)?);

    if config.slack.verify_on_startup {
        match slack.auth_test().await {
            Ok(auth) => info!(
                team_id = auth.team_id.as_deref().unwrap_or("unknown"),
                user_id = auth.user_id.as_deref().unwrap_or("unknown"),
                "Slack access token verified"
            ),
            Err(e) => warn!(error = %e, "Slack auth.test failed, continuing"),
        }
    }

    let classifier = RekognitionClassifier::new(&config.aws).await;
    info!(region = %config.aws.region, "Rekognition client ready");

    let handler = ModerationHandler::new(
        Arc::new(moderation),
        Arc::clone(&slack),
        classifier,
        slack,
    );
    let app = api::router(
        AppState {
            handler: Arc::new(handler),
        },
        &config.server.events_path,
    );

    // Resolve the bind address (CLI overrides take precedence).
    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, events_path = %config.server.events_path, "slackguard listening");

    let shutdown = Arc::new(tokio::sync::Notify::new());
    let serve = axum::serve(listener, app).with_graceful_shutdown({
        let shutdown = Arc::clone(&shutdown);
        async move { shutdown.notified().await }
    });
    let mut server = tokio::spawn(async move { serve.await });

    tokio::select! {
        result = &mut server => result??,
        () = shutdown_signal() => {
            shutdown.notify_one();
            let timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
            match tokio::time::timeout(timeout, server).await {
                Ok(result) => result??,
                Err(_) => warn!(
                    timeout_secs = config.server.shutdown_timeout_seconds,
                    "shutdown timeout exceeded, abandoning in-flight events"
                ),
            }
        }
    }

    // Flush pending OpenTelemetry spans before exit.
    telemetry_guard.shutdown();

    info!("slackguard shut down");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
