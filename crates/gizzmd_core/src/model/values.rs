//! Self-validating value objects for document and user fields.
//!
//! # Responsibility
//! - Normalize and validate raw primitives at the boundary.
//! - Expose read-only accessors; changing a value means constructing a new one.
//!
//! # Invariants
//! - Construction is the only validation entry point.
//! - Length limits count Unicode scalar values, not bytes.
//! - Timestamps carry millisecond precision so they survive storage unchanged.

use crate::model::error::ValidationError;
use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

const MAX_TITLE_CHARS: usize = 100;
const MAX_AUTHOR_NAME_CHARS: usize = 100;
const MAX_SNIPPET_CHARS: usize = 100;
const MAX_TAG_CHARS: usize = 50;
const MAX_CONTENT_BYTES: usize = 16 * 1024 * 1024;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Stable identity shared by documents and users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(Uuid);

impl Id {
    /// Parses any UUID version.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|err| ValidationError::InvalidId {
                value: value.to_string(),
                reason: err.to_string(),
            })
    }

    /// Generates a new random (v4) identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The unassigned identity.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for Id {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for Id {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Document title: trimmed, 1-100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > MAX_TITLE_CHARS {
            return Err(ValidationError::TitleTooLong);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Title {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display name shown as document author: trimmed, 1-100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorName(String);

impl AuthorName {
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyAuthorName);
        }
        if trimmed.chars().count() > MAX_AUTHOR_NAME_CHARS {
            return Err(ValidationError::AuthorNameTooLong);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AuthorName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Markdown body. Any text is accepted; size is checked through
/// [`Content::is_within_16mb`] by the write paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Content(String);

impl Content {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn byte_len(&self) -> usize {
        self.0.len()
    }

    pub fn is_within_16mb(&self) -> bool {
        self.0.len() <= MAX_CONTENT_BYTES
    }

    /// Fails with [`ValidationError::ContentTooLarge`] over 16 MiB.
    pub fn ensure_within_16mb(&self) -> Result<(), ValidationError> {
        if self.is_within_16mb() {
            Ok(())
        } else {
            Err(ValidationError::ContentTooLarge {
                bytes: self.byte_len(),
            })
        }
    }
}

/// Short preview derived from content. At most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Snippet(String);

impl Snippet {
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        if value.chars().count() > MAX_SNIPPET_CHARS {
            return Err(ValidationError::SnippetTooLong);
        }
        Ok(Self(value.to_string()))
    }

    /// Derives the snippet of `content`; always within the length limit.
    pub fn from_content(content: &Content) -> Self {
        Self(extract_snippet(content.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Extracts the preview line of a markdown body.
///
/// Rules:
/// - The whole content is trimmed first; blank content yields `""`.
/// - Only the text before the first `\n` is kept.
/// - The line is cut to 100 characters, without an ellipsis marker.
pub fn extract_snippet(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let first_line = trimmed.split('\n').next().unwrap_or_default();
    first_line.chars().take(MAX_SNIPPET_CHARS).collect()
}

/// Ordered, duplicate-free tag list, serialized as comma-separated text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Tags(Vec<String>);

impl Tags {
    /// Parses comma-separated input. Blank input is an empty tag set.
    ///
    /// Each segment is trimmed and must hold 1-50 characters. Duplicates are
    /// compared case-sensitively.
    pub fn parse(csv: &str) -> Result<Self, ValidationError> {
        let csv = csv.trim();
        if csv.is_empty() {
            return Ok(Self::default());
        }

        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for (index, part) in csv.split(',').enumerate() {
            let tag = part.trim();
            if tag.is_empty() {
                return Err(ValidationError::EmptyTag {
                    position: index + 1,
                });
            }
            if tag.chars().count() > MAX_TAG_CHARS {
                return Err(ValidationError::TagLength {
                    tag: tag.to_string(),
                });
            }
            if !seen.insert(tag) {
                return Err(ValidationError::DuplicateTag {
                    tag: tag.to_string(),
                });
            }
            values.push(tag.to_string());
        }

        Ok(Self(values))
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Storage/wire form: trimmed segments joined by `,`.
    pub fn to_csv(&self) -> String {
        self.0.join(",")
    }
}

impl Display for Tags {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_csv())
    }
}

/// Login address: trimmed, pattern-checked, stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyEmail);
        }
        if !EMAIL_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidEmail {
                value: trimmed.to_string(),
            });
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// UI color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiTheme {
    #[default]
    Light,
    Dark,
}

impl UiTheme {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ValidationError::InvalidUiTheme {
                value: other.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl FromStr for UiTheme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for UiTheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creation instant of a document. Never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CreatedAt(DateTime<Utc>);

/// Last modification instant of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditedAt(DateTime<Utc>);

macro_rules! timestamp_value {
    ($name:ident) => {
        impl $name {
            pub fn new(value: DateTime<Utc>) -> Self {
                Self(truncate_to_millis(value))
            }

            pub fn now() -> Self {
                Self::new(Utc::now())
            }

            /// Rebuilds a timestamp from storage. `None` when out of range.
            pub fn from_epoch_ms(value: i64) -> Option<Self> {
                DateTime::from_timestamp_millis(value).map(Self)
            }

            pub fn value(&self) -> DateTime<Utc> {
                self.0
            }

            pub fn epoch_ms(&self) -> i64 {
                self.0.timestamp_millis()
            }

            /// RFC3339 with second precision, `Z` suffix.
            pub fn to_rfc3339(&self) -> String {
                self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_rfc3339())
            }
        }
    };
}

timestamp_value!(CreatedAt);
timestamp_value!(EditedAt);

fn truncate_to_millis(value: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or(value)
}
