//! Core types and the moderation pipeline for slackguard.
//!
//! An inbound Slack event is validated ([`validator`]), its image downloaded
//! ([`ImageFetcher`]), classified ([`ModerationClassifier`]) and, when flagged,
//! deleted with a channel notice ([`PlatformMutator`]). [`ModerationHandler`]
//! runs those steps in order.

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod outcome;
pub mod provider;
pub mod validator;
pub mod verdict;

pub use config::{ConfigError, MAX_IMAGE_BYTES, ModerationConfig, SUPPORTED_TYPES};
pub use error::ModerationError;
pub use event::{EventDetails, InboundEvent, SharedFile};
pub use handler::{EventHandler, ModerationHandler, REMOVAL_NOTICE};
pub use outcome::{FileShare, IgnoreReason, Outcome, Validation};
pub use provider::{ImageFetcher, ModerationClassifier, PlatformMutator};
pub use verdict::{ModerationLabel, ModerationVerdict};
