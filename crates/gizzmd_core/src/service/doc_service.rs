//! Document use-case service.
//!
//! # Responsibility
//! - Provide create/get/update/delete/list APIs for documents.
//! - Validate raw input into value objects and derive snippets.
//! - Attach pagination metadata to listing results.
//!
//! # Invariants
//! - Update uses partial semantics: absent or empty fields stay unchanged.
//! - Any applied change refreshes `edited_at`; `created_at` is preserved.

use crate::model::document::{Document, DocumentChanges};
use crate::model::query::{DocsQuery, Pagination};
use crate::model::values::{Content, EditedAt, Id, Tags, Title};
use crate::repo::doc_repo::DocRepository;
use crate::service::{non_empty, ServiceResult};
use log::info;

/// Raw create input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDocument {
    pub title: String,
    pub content: String,
    /// Comma-separated tag list.
    pub tags: String,
}

/// Raw partial update input. `None` and `Some("")` both mean "no change".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<String>,
}

/// Listing result: one page plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsListing {
    pub items: Vec<Document>,
    pub pagination: Pagination,
}

/// Document service facade over a repository implementation.
pub struct DocService<R: DocRepository> {
    repo: R,
}

impl<R: DocRepository> DocService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a document owned by `author_id`.
    ///
    /// Title is required; content may be empty; tags may be blank.
    pub fn create_document(&self, author_id: Id, input: &CreateDocument) -> ServiceResult<Document> {
        let title = Title::new(&input.title)?;
        let content = Content::new(input.content.as_str());
        content.ensure_within_16mb()?;
        let tags = Tags::parse(&input.tags)?;

        let doc = Document::draft(title, content, tags, author_id).assign_id(Id::generate())?;
        let saved = self.repo.save_document(&doc)?;
        info!(
            "event=doc_create module=service status=ok doc_id={} author_id={}",
            saved.id(),
            saved.author_id()
        );
        Ok(saved)
    }

    pub fn get_document(&self, id: Id) -> ServiceResult<Document> {
        Ok(self.repo.find_document(id)?)
    }

    /// Applies a partial update and persists the rebuilt document.
    pub fn update_document(&self, id: Id, patch: &DocumentPatch) -> ServiceResult<Document> {
        let changes = DocumentChanges {
            title: non_empty(patch.title.as_deref())
                .map(Title::new)
                .transpose()?,
            content: non_empty(patch.content.as_deref()).map(Content::new),
            tags: non_empty(patch.tags.as_deref())
                .map(Tags::parse)
                .transpose()?,
        };
        if let Some(content) = changes.content.as_ref() {
            content.ensure_within_16mb()?;
        }

        let current = self.repo.find_document(id)?;
        let updated = current.apply(changes, EditedAt::now());
        let saved = self.repo.save_document(&updated)?;
        info!(
            "event=doc_update module=service status=ok doc_id={}",
            saved.id()
        );
        Ok(saved)
    }

    pub fn delete_document(&self, id: Id) -> ServiceResult<()> {
        self.repo.delete_document(id)?;
        info!("event=doc_delete module=service status=ok doc_id={id}");
        Ok(())
    }

    /// Lists one page of documents matching `query`.
    pub fn list_documents(&self, query: &DocsQuery) -> ServiceResult<DocsListing> {
        let page = self.repo.find_documents(query)?;
        Ok(DocsListing {
            pagination: Pagination::new(query.page(), query.limit(), page.total),
            items: page.items,
        })
    }
}
