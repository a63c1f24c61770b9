use serde::{Deserialize, Serialize};

/// A content-category label returned by the moderation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationLabel {
    pub name: String,
    /// Top-level category, empty for top-level labels.
    #[serde(default)]
    pub parent_name: Option<String>,
    /// Confidence in percent.
    pub confidence: f32,
}

/// Labels the moderation service reported at or above the confidence floor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerationVerdict {
    pub labels: Vec<ModerationLabel>,
}

impl ModerationVerdict {
    pub fn new(labels: Vec<ModerationLabel>) -> Self {
        Self { labels }
    }

    /// An image is explicit when at least one label was returned.
    pub fn is_explicit(&self) -> bool {
        !self.labels.is_empty()
    }

    /// Label names, for logging.
    pub fn label_names(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.name.as_str()).collect()
    }
}
