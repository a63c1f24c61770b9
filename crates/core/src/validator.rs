use tracing::{debug, info};

use crate::config::ModerationConfig;
use crate::event::InboundEvent;
use crate::outcome::{FileShare, IgnoreReason, Validation};

/// Subtype of the message events that carry a shared file.
pub const FILE_SHARE_SUBTYPE: &str = "file_share";

/// Decide whether an inbound event should be moderated.
///
/// The checks run in a fixed order: verification token, then the
/// URL-verification challenge, then the shape and file filters. Nothing here
/// performs I/O.
pub fn validate(event: &InboundEvent, config: &ModerationConfig) -> Validation {
    if !config.token_matches(&event.token) {
        info!(reason = %IgnoreReason::InvalidToken, "presented with invalid token, ignoring event");
        return Validation::Ignored(IgnoreReason::InvalidToken);
    }

    if let Some(challenge) = &event.challenge {
        info!("presented with URL verification challenge, responding");
        return Validation::Handshake(challenge.clone());
    }

    let Some(details) = &event.event else {
        return ignore(IgnoreReason::MalformedEvent, "event callback without an inner event");
    };

    if details.subtype.as_deref() != Some(FILE_SHARE_SUBTYPE) {
        debug!(subtype = ?details.subtype, "not a file_share event");
        return ignore(IgnoreReason::NotFileShare, "not a file_share event, ignoring");
    }

    let (Some(channel), Some(file)) = (&details.channel, &details.file) else {
        return ignore(IgnoreReason::MalformedEvent, "file_share event without channel or file");
    };

    if !config.supports(&file.mimetype) {
        debug!(mimetype = %file.mimetype, file_id = %file.id, "unsupported file type");
        return ignore(IgnoreReason::UnsupportedType, "file is not a supported image, ignoring");
    }

    if file.size > config.max_size {
        debug!(size = file.size, max_size = config.max_size, file_id = %file.id, "file too large");
        return ignore(IgnoreReason::TooLarge, "image is larger than the moderation limit, ignoring");
    }

    Validation::Accepted(FileShare {
        file_id: file.id.clone(),
        channel: channel.clone(),
        url_private: file.url_private.clone(),
    })
}

fn ignore(reason: IgnoreReason, message: &str) -> Validation {
    info!(reason = %reason, "{message}");
    Validation::Ignored(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_IMAGE_BYTES;
    use crate::event::{EventDetails, SharedFile};

    fn config() -> ModerationConfig {
        ModerationConfig::new("verif", "xoxb", 60.0)
    }

    fn file_event(mimetype: &str, size: u64) -> InboundEvent {
        InboundEvent {
            token: "verif".into(),
            challenge: None,
            event: Some(EventDetails {
                subtype: Some("file_share".into()),
                channel: Some("C1".into()),
                file: Some(SharedFile {
                    id: "F1".into(),
                    mimetype: mimetype.into(),
                    size,
                    url_private: "https://files.slack.com/F1".into(),
                }),
            }),
        }
    }

    #[test]
    fn accepts_supported_image() {
        let validation = validate(&file_event("image/png", 10), &config());
        assert_eq!(
            validation,
            Validation::Accepted(FileShare {
                file_id: "F1".into(),
                channel: "C1".into(),
                url_private: "https://files.slack.com/F1".into(),
            })
        );
    }

    #[test]
    fn rejects_bad_token_before_challenge() {
        let event = InboundEvent {
            token: "forged".into(),
            challenge: Some("abc123".into()),
            event: None,
        };
        assert_eq!(
            validate(&event, &config()),
            Validation::Ignored(IgnoreReason::InvalidToken)
        );
    }

    #[test]
    fn challenge_short_circuits_shape_checks() {
        let mut event = file_event("image/gif", u64::MAX);
        event.challenge = Some("abc123".into());
        assert_eq!(
            validate(&event, &config()),
            Validation::Handshake("abc123".into())
        );
    }

    #[test]
    fn ignores_other_subtypes() {
        let mut event = file_event("image/png", 10);
        if let Some(details) = event.event.as_mut() {
            details.subtype = Some("channel_join".into());
        }
        assert_eq!(
            validate(&event, &config()),
            Validation::Ignored(IgnoreReason::NotFileShare)
        );

        let mut event = file_event("image/png", 10);
        if let Some(details) = event.event.as_mut() {
            details.subtype = None;
        }
        assert_eq!(
            validate(&event, &config()),
            Validation::Ignored(IgnoreReason::NotFileShare)
        );
    }

    #[test]
    fn ignores_unsupported_type() {
        assert_eq!(
            validate(&file_event("image/gif", 10), &config()),
            Validation::Ignored(IgnoreReason::UnsupportedType)
        );
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(matches!(
            validate(&file_event("image/jpeg", MAX_IMAGE_BYTES), &config()),
            Validation::Accepted(_)
        ));
        assert_eq!(
            validate(&file_event("image/jpeg", MAX_IMAGE_BYTES + 1), &config()),
            Validation::Ignored(IgnoreReason::TooLarge)
        );
    }

    #[test]
    fn missing_inner_event_is_malformed() {
        let event = InboundEvent {
            token: "verif".into(),
            challenge: None,
            event: None,
        };
        assert_eq!(
            validate(&event, &config()),
            Validation::Ignored(IgnoreReason::MalformedEvent)
        );
    }

    #[test]
    fn missing_file_is_malformed() {
        let mut event = file_event("image/png", 10);
        if let Some(details) = event.event.as_mut() {
            details.file = None;
        }
        assert_eq!(
            validate(&event, &config()),
            Validation::Ignored(IgnoreReason::MalformedEvent)
        );
    }
}
