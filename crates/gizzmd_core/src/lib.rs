//! Core domain logic for gizzmd document management.
//! This crate is the single source of truth for document and query invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{Document, DocumentChanges, DocumentParts};
pub use model::error::{IdAlreadySet, ValidationError};
pub use model::query::{
    DateFilter, DateRange, DocsQuery, Limit, Page, Pagination, SortBy, SortOrder,
};
pub use model::user::{User, UserChanges};
pub use model::values::{
    extract_snippet, AuthorName, Content, CreatedAt, EditedAt, Email, Id, Snippet, Tags, Title,
    UiTheme,
};
pub use query::executor::{execute_docs_query, DocsPage};
pub use repo::doc_repo::{DocRepository, SqliteDocRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::doc_service::{CreateDocument, DocService, DocsListing, DocumentPatch};
pub use service::user_service::{UserPatch, UserService};
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
