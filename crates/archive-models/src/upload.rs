//! Upload form and file-type rules.

use std::borrow::Cow;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::video::VideoMetadata;

/// Extensions accepted as single-video uploads, with their MIME types.
const VIDEO_TYPES: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("m4v", "video/x-m4v"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("avi", "video/x-msvideo"),
    ("wmv", "video/x-ms-wmv"),
    ("mpeg", "video/mpeg"),
    ("mpg", "video/mpeg"),
    ("ogv", "video/ogg"),
    ("3gp", "video/3gpp"),
];

const ZIP_CONTENT_TYPE: &str = "application/zip";

pub type UploadResult<T> = Result<T, UploadError>;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Unsupported file '{0}': upload a video or a ZIP file containing videos")]
    UnsupportedFile(String),

    #[error("Invalid upload form: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// What kind of file is being uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// A single video file
    Video { content_type: &'static str },
    /// A ZIP archive of videos
    Archive,
}

impl UploadKind {
    /// Classify a file by its name.
    pub fn from_file_name(file_name: &str) -> UploadResult<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| UploadError::UnsupportedFile(file_name.to_string()))?;

        if extension == "zip" {
            return Ok(Self::Archive);
        }

        VIDEO_TYPES
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|&(_, content_type)| Self::Video { content_type })
            .ok_or_else(|| UploadError::UnsupportedFile(file_name.to_string()))
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Video { content_type } => *content_type,
            Self::Archive => ZIP_CONTENT_TYPE,
        }
    }

    pub fn is_archive(&self) -> bool {
        matches!(self, Self::Archive)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Video { .. } => "Video file",
            Self::Archive => "ZIP file containing videos",
        }
    }
}

/// Metadata entered alongside an uploaded file.
///
/// `tags` is the raw comma-separated string; the backend splits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct UploadForm {
    #[validate(custom(function = "not_blank"), length(max = 300))]
    pub title: String,

    #[validate(custom(function = "not_blank"))]
    pub description: String,

    #[serde(default)]
    pub school: String,

    #[serde(default)]
    pub tags: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

impl UploadForm {
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

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Validate the form, returning it unchanged when valid.
    pub fn validated(self) -> UploadResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Multipart text fields in submission order.
    pub fn text_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("title", self.title.as_str()),
            ("school", self.school.as_str()),
            ("description", self.description.as_str()),
            ("tags", self.tags.as_str()),
        ]
    }

    /// Metadata the backend will store for this form.
    pub fn to_metadata(&self) -> VideoMetadata {
        VideoMetadata {
            title: self.title.clone(),
            description: self.description.clone(),
            tags: parse_tags(&self.tags),
            school: self.school.clone(),
        }
    }
}

/// Split a comma-separated tag string, trimming and dropping empties.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
