//! Domain model for documents, users and document listing queries.
//!
//! # Responsibility
//! - Define the value objects that validate every primitive field.
//! - Define immutable entities built only from those value objects.
//!
//! # Invariants
//! - Invalid input never produces a partially valid entity.
//! - Entities expose accessors only; updates build new instances.

pub mod document;
pub mod error;
pub mod query;
pub mod user;
pub mod values;
