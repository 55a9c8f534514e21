//! Request and response shapes for post generation.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Prefix carried by a failed variant once it is rendered as plain text.
pub const ERROR_PREFIX: &str = "Error: ";

/// Social platform a post is written for.
///
/// Unknown platforms are kept verbatim so the prompt can still name them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Linkedin,
    X,
    Other(String),
}

impl Platform {
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Linkedin => "linkedin",
            Platform::X => "x",
            Platform::Other(name) => name,
        }
    }

    /// Bounded label for metrics: unknown platforms all collapse to `other`.
    pub fn metric_label(&self) -> &'static str {
        match self {
            Platform::Linkedin => "linkedin",
            Platform::X => "x",
            Platform::Other(_) => "other",
        }
    }
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        if value == "linkedin" {
            Platform::Linkedin
        } else if value == "x" {
            Platform::X
        } else {
            Platform::Other(value)
        }
    }
}

impl From<&str> for Platform {
    fn from(value: &str) -> Self {
        Platform::from(value.to_string())
    }
}

impl From<Platform> for String {
    fn from(value: Platform) -> Self {
        match value {
            Platform::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length bucket of a generated post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSize {
    Small,
    Medium,
    Long,
}

impl ContentSize {
    /// Generation order for every request.
    pub const ALL: [ContentSize; 3] = [ContentSize::Small, ContentSize::Medium, ContentSize::Long];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentSize::Small => "small",
            ContentSize::Medium => "medium",
            ContentSize::Long => "long",
        }
    }
}

impl fmt::Display for ContentSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a single generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub idea: String,
    pub target_audience: String,
    pub platform: Platform,
    pub post_category: String,
}

/// Outcome of one completion.
///
/// On the wire both arms are a plain string; a failure reads `"Error: <reason>"`.
/// Reading a string back is lossy: generated text that itself begins with
/// `"Error: "` comes back as `Failed`. Its rendered form is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentVariant {
    Generated(String),
    Failed(String),
}

impl ContentVariant {
    pub fn is_failed(&self) -> bool {
        matches!(self, ContentVariant::Failed(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ContentVariant::Generated(text) => Some(text),
            ContentVariant::Failed(_) => None,
        }
    }
}

impl fmt::Display for ContentVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentVariant::Generated(text) => f.write_str(text),
            ContentVariant::Failed(reason) => write!(f, "{}{}", ERROR_PREFIX, reason),
        }
    }
}

impl From<ContentVariant> for String {
    fn from(value: ContentVariant) -> Self {
        match value {
            ContentVariant::Generated(text) => text,
            failed => failed.to_string(),
        }
    }
}

impl From<String> for ContentVariant {
    fn from(value: String) -> Self {
        if let Some(reason) = value.strip_prefix(ERROR_PREFIX) {
            return ContentVariant::Failed(reason.to_string());
        }
        ContentVariant::Generated(value)
    }
}

/// The three size variants produced for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformContent {
    pub small: ContentVariant,
    pub medium: ContentVariant,
    pub long: ContentVariant,
}

impl PlatformContent {
    pub fn get(&self, size: ContentSize) -> &ContentVariant {
        match size {
            ContentSize::Small => &self.small,
            ContentSize::Medium => &self.medium,
            ContentSize::Long => &self.long,
        }
    }

    pub fn failed_count(&self) -> usize {
        ContentSize::ALL
            .iter()
            .filter(|size| self.get(**size).is_failed())
            .count()
    }
}

/// Response of `POST /generate_content`.
///
/// Serializes as `{"<platform>": {...}, "document_id": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub platform: Platform,
    pub content: PlatformContent,
    pub document_id: Option<String>,
}

impl Serialize for GenerationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.platform.as_str(), &self.content)?;
        map.serialize_entry("document_id", &self.document_id)?;
        map.end()
    }
}
