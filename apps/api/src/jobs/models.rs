use serde::{Deserialize, Serialize};

/// Link used when a posting carries no usable href.
pub const PLACEHOLDER_LINK: &str = "#";
/// Source tag for postings acquired from the live listing.
pub const DEFAULT_SOURCE: &str = "LinkedIn";

/// A single job posting, normalized so every field is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_link")]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_link() -> String {
    PLACEHOLDER_LINK.to_string()
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

/// A posting as extracted from markup. Any sub-element may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPosting {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub source: Option<String>,
}

impl RawPosting {
    /// Defaulting step. Returns `None` when the title is empty after trimming,
    /// so untitled postings never reach the caller.
    pub fn into_record(self) -> Option<JobRecord> {
        let title = self.title.map(|t| t.trim().to_string()).unwrap_or_default();
        if title.is_empty() {
            return None;
        }

        Some(JobRecord {
            title,
            company: self.company.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            link: self
                .link
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(default_link),
            description: self.description.unwrap_or_default(),
            source: self
                .source
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(default_source),
        })
    }
}

/// A job with its relevance score against the user's skills. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredJob {
    pub title: String,
    pub company: String,
    pub score: u32,
}
