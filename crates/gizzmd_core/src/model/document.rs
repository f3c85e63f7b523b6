//! Document entity.
//!
//! # Responsibility
//! - Compose value objects into the immutable document record.
//! - Express updates as pure `(old, changes) -> new` reconstruction.
//!
//! # Invariants
//! - `snippet` always equals the snippet derived from `content`.
//! - `created_at` never changes after creation.
//! - Any applied change refreshes `edited_at`; an empty change set is a no-op.

use crate::model::error::IdAlreadySet;
use crate::model::values::{Content, CreatedAt, EditedAt, Id, Snippet, Tags, Title};

/// Immutable markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: Id,
    title: Title,
    content: Content,
    tags: Tags,
    snippet: Snippet,
    author_id: Id,
    created_at: CreatedAt,
    edited_at: EditedAt,
}

/// Field set used to rebuild a document read back from storage.
#[derive(Debug, Clone)]
pub struct DocumentParts {
    pub id: Id,
    pub title: Title,
    pub content: Content,
    pub tags: Tags,
    pub snippet: Snippet,
    pub author_id: Id,
    pub created_at: CreatedAt,
    pub edited_at: EditedAt,
}

/// Requested field changes. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentChanges {
    pub title: Option<Title>,
    pub content: Option<Content>,
    pub tags: Option<Tags>,
}

impl DocumentChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none()
    }
}

impl Document {
    /// Creates a document without identity; see [`Document::assign_id`].
    pub fn draft(title: Title, content: Content, tags: Tags, author_id: Id) -> Self {
        let now = CreatedAt::now();
        let snippet = Snippet::from_content(&content);
        Self {
            id: Id::nil(),
            title,
            content,
            tags,
            snippet,
            author_id,
            created_at: now,
            edited_at: EditedAt::new(now.value()),
        }
    }

    /// Rebuilds a document from already-validated parts.
    pub fn from_parts(parts: DocumentParts) -> Self {
        Self {
            id: parts.id,
            title: parts.title,
            content: parts.content,
            tags: parts.tags,
            snippet: parts.snippet,
            author_id: parts.author_id,
            created_at: parts.created_at,
            edited_at: parts.edited_at,
        }
    }

    /// Returns a copy carrying `id`. Fails when an identity is already set.
    pub fn assign_id(&self, id: Id) -> Result<Self, IdAlreadySet> {
        if !self.id.is_nil() {
            return Err(IdAlreadySet { current: self.id });
        }
        Ok(Self {
            id,
            ..self.clone()
        })
    }

    /// Returns the document with `changes` applied and `edited_at = now`.
    ///
    /// A content change re-derives the snippet.
    pub fn apply(&self, changes: DocumentChanges, now: EditedAt) -> Self {
        if changes.is_empty() {
            return self.clone();
        }

        let content = changes.content.unwrap_or_else(|| self.content.clone());
        let snippet = Snippet::from_content(&content);
        Self {
            id: self.id,
            title: changes.title.unwrap_or_else(|| self.title.clone()),
            content,
            tags: changes.tags.unwrap_or_else(|| self.tags.clone()),
            snippet,
            author_id: self.author_id,
            created_at: self.created_at,
            edited_at: now,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn snippet(&self) -> &Snippet {
        &self.snippet
    }

    pub fn author_id(&self) -> Id {
        self.author_id
    }

    pub fn created_at(&self) -> CreatedAt {
        self.created_at
    }

    pub fn edited_at(&self) -> EditedAt {
        self.edited_at
    }
}
