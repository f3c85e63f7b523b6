//! Document listing execution.
//!
//! # Responsibility
//! - Apply a [`crate::model::query::DocsQuery`] to an in-memory collection.
//! - Keep filter/sort/paginate logic pure so any storage backend can reuse it.

pub mod executor;
