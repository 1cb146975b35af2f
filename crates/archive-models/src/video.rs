//! Video catalog records.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Generate a new random video ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Descriptive metadata attached to an uploaded video.
///
/// Older records may lack `school` or `tags` entirely; those deserialize
/// to the empty string and the empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VideoMetadata {
    /// Video title
    pub title: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Tags in the order they were entered
    #[serde(default)]
    pub tags: Vec<String>,

    /// School the video belongs to (may be empty)
    #[serde(default)]
    pub school: String,
}

impl VideoMetadata {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = school.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// One catalog entry as returned by the backend's list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VideoRecord {
    /// Unique video ID
    pub id: VideoId,

    /// Stored file name under the backend's uploads directory
    pub filename: String,

    /// Descriptive metadata
    pub metadata: VideoMetadata,
}

impl VideoRecord {
    pub fn new(id: impl Into<VideoId>, filename: impl Into<String>, metadata: VideoMetadata) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            metadata,
        }
    }

    /// Playback URL for the stored file, served by the backend at `/uploads/<filename>`.
    pub fn media_url(&self, base_url: &str) -> String {
        format!(
            "{}/uploads/{}",
            base_url.trim_end_matches('/'),
            urlencoding::encode(&self.filename)
        )
    }
}
