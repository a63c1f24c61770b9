//! Slack Web API client for slackguard.
//!
//! Downloads privately shared files and performs the two mutations the
//! moderation flow needs: `files.delete` and `chat.postMessage`.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::SlackClient;
pub use config::SlackConfig;
pub use error::SlackError;
