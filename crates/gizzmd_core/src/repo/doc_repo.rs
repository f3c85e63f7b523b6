//! Document repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide find/list/upsert/delete APIs over the `docs` table.
//! - Feed listing queries through the pure executor.
//!
//! # Invariants
//! - Upserts never overwrite `created_at` or `author_id` of an existing row.
//! - Content above 16 MiB is rejected before any SQL runs.
//! - Listing reads rows in storage (`rowid`) order so sort ties are stable.

use crate::model::document::{Document, DocumentParts};
use crate::model::query::DocsQuery;
use crate::model::values::{Content, CreatedAt, EditedAt, Id, Snippet, Tags, Title};
use crate::query::executor::{execute_docs_query, DocsPage};
use crate::repo::{ensure_table_ready, invalid_column, RepoError, RepoResult};
use log::{debug, error};
use rusqlite::{params, Connection, Row};
use std::time::Instant;

const DOC_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    tags,
    snippet,
    author_id,
    created_at,
    edited_at
FROM docs";

const DOC_COLUMNS: &[&str] = &[
    "id",
    "title",
    "content",
    "tags",
    "snippet",
    "author_id",
    "created_at",
    "edited_at",
];

/// Storage collaborator for documents.
pub trait DocRepository {
    /// Loads one document; `NotFound` when no row has `id`.
    fn find_document(&self, id: Id) -> RepoResult<Document>;
    /// Returns the requested page and the pre-pagination match count.
    fn find_documents(&self, query: &DocsQuery) -> RepoResult<DocsPage>;
    /// Inserts or updates by id and returns the stored state.
    fn save_document(&self, doc: &Document) -> RepoResult<Document>;
    /// Hard-deletes one document; `NotFound` when no row has `id`.
    fn delete_document(&self, id: Id) -> RepoResult<()>;
}

/// SQLite-backed document repository.
pub struct SqliteDocRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "docs", DOC_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl DocRepository for SqliteDocRepository<'_> {
    fn find_document(&self, id: Id) -> RepoResult<Document> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DOC_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => parse_doc_row(row),
            None => Err(RepoError::NotFound(id)),
        }
    }

    fn find_documents(&self, query: &DocsQuery) -> RepoResult<DocsPage> {
        let started_at = Instant::now();
        let mut stmt = self
            .conn
            .prepare(&format!("{DOC_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;

        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            match parse_doc_row(row) {
                Ok(doc) => documents.push(doc),
                Err(err) => {
                    error!(
                        "event=docs_query module=repo status=error error_code=reconstruction_failed error={err}"
                    );
                    return Err(err);
                }
            }
        }

        let scanned = documents.len();
        let page = execute_docs_query(query, documents);
        debug!(
            "event=docs_query module=repo status=ok scanned={scanned} total={} returned={} page={} limit={} sort_by={} sort_order={} duration_ms={}",
            page.total,
            page.items.len(),
            query.page().value(),
            query.limit().value(),
            query.sort_by(),
            query.sort_order(),
            started_at.elapsed().as_millis()
        );
        Ok(page)
    }

    fn save_document(&self, doc: &Document) -> RepoResult<Document> {
        if doc.id().is_nil() {
            return Err(RepoError::UnassignedId);
        }
        doc.content().ensure_within_16mb()?;

        self.conn.execute(
            "INSERT INTO docs (
                id,
                title,
                content,
                tags,
                snippet,
                author_id,
                created_at,
                edited_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                content = excluded.content,
                tags = excluded.tags,
                snippet = excluded.snippet,
                edited_at = excluded.edited_at;",
            params![
                doc.id().to_string(),
                doc.title().as_str(),
                doc.content().as_str(),
                doc.tags().to_csv(),
                doc.snippet().as_str(),
                doc.author_id().to_string(),
                doc.created_at().epoch_ms(),
                doc.edited_at().epoch_ms(),
            ],
        )?;
        debug!(
            "event=doc_save module=repo status=ok doc_id={} content_bytes={}",
            doc.id(),
            doc.content().byte_len()
        );

        self.find_document(doc.id())
    }

    fn delete_document(&self, id: Id) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM docs WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        debug!("event=doc_delete module=repo status=ok doc_id={id}");
        Ok(())
    }
}

fn parse_doc_row(row: &Row<'_>) -> RepoResult<Document> {
    let id_text: String = row.get("id")?;
    let id = Id::parse(&id_text).map_err(|err| invalid_column("docs", "id", err))?;

    let title_text: String = row.get("title")?;
    let title = Title::new(&title_text).map_err(|err| invalid_column("docs", "title", err))?;

    let tags_text: String = row.get("tags")?;
    let tags = Tags::parse(&tags_text).map_err(|err| invalid_column("docs", "tags", err))?;

    let snippet_text: String = row.get("snippet")?;
    let snippet =
        Snippet::new(&snippet_text).map_err(|err| invalid_column("docs", "snippet", err))?;

    let author_text: String = row.get("author_id")?;
    let author_id =
        Id::parse(&author_text).map_err(|err| invalid_column("docs", "author_id", err))?;

    let created_ms: i64 = row.get("created_at")?;
    let created_at = CreatedAt::from_epoch_ms(created_ms).ok_or_else(|| {
        invalid_column("docs", "created_at", format!("out of range `{created_ms}`"))
    })?;

    let edited_ms: i64 = row.get("edited_at")?;
    let edited_at = EditedAt::from_epoch_ms(edited_ms).ok_or_else(|| {
        invalid_column("docs", "edited_at", format!("out of range `{edited_ms}`"))
    })?;

    Ok(Document::from_parts(DocumentParts {
        id,
        title,
        content: Content::new(row.get::<_, String>("content")?),
        tags,
        snippet,
        author_id,
        created_at,
        edited_at,
    }))
}
