//! Core use-case services.
//!
//! # Responsibility
//! - Turn raw caller input into value objects before any entity is built.
//! - Orchestrate one logical read-then-write per call against repositories.
//! - Collapse repository failures into the domain error taxonomy.
//!
//! # Invariants
//! - Services never retry; storage failures propagate unchanged in kind.

use crate::model::error::{IdAlreadySet, ValidationError};
use crate::model::values::Id;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod doc_service;
pub mod user_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Domain error taxonomy surfaced to callers.
#[derive(Debug)]
pub enum ServiceError {
    /// Bad input shape or range; the message is client-safe.
    ValidationFailed(ValidationError),
    EntityNotFound(Id),
    IdAlreadySet(IdAlreadySet),
    /// A persisted record failed value-object reconstruction.
    Reconstruction(String),
    /// Storage failure not otherwise classified.
    Unknown(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed(err) => write!(f, "validation failed: {err}"),
            Self::EntityNotFound(id) => write!(f, "entity not found: {id}"),
            Self::IdAlreadySet(err) => write!(f, "{err}"),
            Self::Reconstruction(details) => write!(f, "failed to rebuild stored entity: {details}"),
            Self::Unknown(err) => write!(f, "unknown error: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ValidationFailed(err) => Some(err),
            Self::IdAlreadySet(err) => Some(err),
            Self::Unknown(err) => Some(err),
            Self::EntityNotFound(_) | Self::Reconstruction(_) => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::ValidationFailed(value)
    }
}

impl From<IdAlreadySet> for ServiceError {
    fn from(value: IdAlreadySet) -> Self {
        Self::IdAlreadySet(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::ValidationFailed(err),
            RepoError::NotFound(id) => Self::EntityNotFound(id),
            RepoError::InvalidData(details) => Self::Reconstruction(details),
            other => Self::Unknown(other),
        }
    }
}

/// Treats absent and empty input alike: both mean "leave unchanged".
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}
