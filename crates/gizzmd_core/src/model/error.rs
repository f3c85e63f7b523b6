//! Domain-level validation errors.
//!
//! # Responsibility
//! - Describe every way a raw primitive can fail value-object construction.
//! - Keep human-readable reasons stable, since they are surfaced to clients.
//!
//! # Invariants
//! - Every variant renders a message that is safe to return to the caller.

use crate::model::values::Id;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Value-object construction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    TitleTooLong,
    EmptyAuthorName,
    AuthorNameTooLong,
    SnippetTooLong,
    ContentTooLarge { bytes: usize },
    /// `position` is 1-based.
    EmptyTag { position: usize },
    TagLength { tag: String },
    DuplicateTag { tag: String },
    InvalidId { value: String, reason: String },
    PageOutOfRange { value: i64 },
    LimitTooSmall { value: i64 },
    LimitTooLarge { value: i64 },
    InvalidSortBy { value: String },
    InvalidSortOrder { value: String },
    InvalidDate { value: String },
    InvertedDateRange,
    EmptyEmail,
    InvalidEmail { value: String },
    EmailAlreadyRegistered { email: String },
    InvalidUiTheme { value: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "document title cannot be empty"),
            Self::TitleTooLong => write!(f, "document title cannot exceed 100 characters"),
            Self::EmptyAuthorName => write!(f, "author name cannot be empty"),
            Self::AuthorNameTooLong => write!(f, "author name cannot exceed 100 characters"),
            Self::SnippetTooLong => write!(f, "snippet cannot exceed 100 characters"),
            Self::ContentTooLarge { bytes } => {
                write!(f, "content cannot exceed 16MB (got {bytes} bytes)")
            }
            Self::EmptyTag { position } => write!(f, "tag at position {position} is empty"),
            Self::TagLength { tag } => write!(f, "tag '{tag}' must be 1-50 characters"),
            Self::DuplicateTag { tag } => write!(f, "duplicate tag: {tag}"),
            Self::InvalidId { value, reason } => write!(f, "invalid UUID `{value}`: {reason}"),
            Self::PageOutOfRange { .. } => write!(f, "page must be greater than 0"),
            Self::LimitTooSmall { .. } => write!(f, "limit must be greater than 0"),
            Self::LimitTooLarge { .. } => write!(f, "limit cannot exceed 100"),
            Self::InvalidSortBy { value } => write!(
                f,
                "invalid sort_by field: {value}. allowed values: created_at, updated_at, title"
            ),
            Self::InvalidSortOrder { value } => {
                write!(f, "invalid sort_order: {value}. allowed values: asc, desc")
            }
            Self::InvalidDate { value } => write!(
                f,
                "invalid date format: {value}. expected RFC3339 format (e.g., 2024-01-01T00:00:00Z)"
            ),
            Self::InvertedDateRange => write!(f, "from date cannot be after to date"),
            Self::EmptyEmail => write!(f, "email cannot be empty"),
            Self::InvalidEmail { value } => write!(f, "invalid email format: {value}"),
            Self::EmailAlreadyRegistered { email } => {
                write!(f, "email is already registered: {email}")
            }
            Self::InvalidUiTheme { value } => {
                write!(f, "invalid UI theme: {value} (must be 'light' or 'dark')")
            }
        }
    }
}

impl Error for ValidationError {}

/// Raised when an identity is assigned to an entity that already has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdAlreadySet {
    pub current: Id,
}

impl Display for IdAlreadySet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID is already set and cannot be changed (current: {})",
            self.current
        )
    }
}

impl Error for IdAlreadySet {}
