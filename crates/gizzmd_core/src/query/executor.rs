//! Pure filter/sort/paginate pass over persisted documents.
//!
//! # Responsibility
//! - Select documents matching tag and date-range predicates.
//! - Sort by the whitelisted key and slice one page.
//!
//! # Invariants
//! - `total` is the match count before pagination.
//! - Sorting is stable: ties keep storage order in both directions.
//! - Offsets beyond the match count yield an empty page, not an error.
//! - Tag filtering is substring containment against the comma-joined tag
//!   text, so `tes` matches a document tagged `test`. This mirrors SQL
//!   `LIKE '%tag%'` and is kept as-is.

use crate::model::document::Document;
use crate::model::query::{DocsQuery, SortBy};
use std::cmp::Ordering;

/// One page of matching documents plus the pre-pagination match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsPage {
    pub items: Vec<Document>,
    pub total: u64,
}

/// Runs `query` against `documents`, given in storage order.
pub fn execute_docs_query(query: &DocsQuery, documents: Vec<Document>) -> DocsPage {
    let mut matched: Vec<Document> = documents
        .into_iter()
        .filter(|doc| matches_query(query, doc))
        .collect();
    let total = matched.len() as u64;

    let sort_by = query.sort_by();
    let descending = query.sort_order().is_desc();
    matched.sort_by(|left, right| {
        let ordering = compare_by(sort_by, left, right);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });

    let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
    let limit = query.limit().value() as usize;
    let items = matched.into_iter().skip(offset).take(limit).collect();

    DocsPage { items, total }
}

/// Whether `doc` passes the tag and both date-range predicates.
fn matches_query(query: &DocsQuery, doc: &Document) -> bool {
    matches_tags(query, doc)
        && query.created_range().contains(doc.created_at().value())
        && query.updated_range().contains(doc.edited_at().value())
}

fn matches_tags(query: &DocsQuery, doc: &Document) -> bool {
    if query.tags().is_empty() {
        return true;
    }
    let serialized = doc.tags().to_csv();
    query
        .tags()
        .values()
        .iter()
        .all(|tag| serialized.contains(tag.as_str()))
}

fn compare_by(sort_by: SortBy, left: &Document, right: &Document) -> Ordering {
    match sort_by {
        SortBy::CreatedAt => left.created_at().cmp(&right.created_at()),
        SortBy::UpdatedAt => left.edited_at().cmp(&right.edited_at()),
        SortBy::Title => left.title().as_str().cmp(right.title().as_str()),
    }
}
