//! Status-classed API errors.
//!
//! # Invariants
//! - 5xx errors carry a generic message; the cause is only logged.
//! - Validation messages are passed through verbatim as 400s.

use crate::auth::AuthError;
use crate::dto::ErrorBody;
use gizzmd_core::ServiceError;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ApiResult<T> = Result<T, ApiError>;

pub const BAD_REQUEST: u16 = 400;
pub const UNAUTHORIZED: u16 = 401;
pub const NOT_FOUND: u16 = 404;
pub const CONFLICT: u16 = 409;
pub const INTERNAL_SERVER_ERROR: u16 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(NOT_FOUND, message)
    }

    /// Logs `cause` and returns a 500 that only carries `message`.
    pub fn internal(message: impl Into<String>, cause: &dyn Display) -> Self {
        let message = message.into();
        error!("event=api_error module=api status=error message={message:?} cause={cause}");
        Self::new(INTERNAL_SERVER_ERROR, message)
    }

    /// Maps a service failure; `subject` names the entity for 404s and
    /// `action` phrases the generic 500 message.
    pub fn from_service(err: ServiceError, subject: &str, action: &str) -> Self {
        match err {
            ServiceError::ValidationFailed(err) => Self::bad_request(err.to_string()),
            ServiceError::EntityNotFound(_) => Self::not_found(format!("{subject} not found")),
            ServiceError::IdAlreadySet(err) => Self::new(CONFLICT, err.to_string()),
            other => Self::internal(format!("Failed to {action}"), &other),
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= INTERNAL_SERVER_ERROR
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.message.clone(),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

impl Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::MissingHeader | AuthError::MalformedHeader => {
                Self::unauthorized("Missing or invalid Authorization header")
            }
            AuthError::InvalidToken(_) | AuthError::InvalidSubject(_) => {
                Self::unauthorized("Invalid or expired token")
            }
            AuthError::InvalidCredentials => {
                Self::unauthorized("The provided username or password is incorrect")
            }
            AuthError::Signing(_) => Self::internal("Failed to generate token", &value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiError, CONFLICT, INTERNAL_SERVER_ERROR, NOT_FOUND};
    use gizzmd_core::db::DbError;
    use gizzmd_core::{Id, IdAlreadySet, RepoError, ServiceError, ValidationError};

    #[test]
    fn service_errors_map_to_status_classes() {
        let validation = ApiError::from_service(
            ServiceError::ValidationFailed(ValidationError::EmptyTitle),
            "Document",
            "update document",
        );
        assert_eq!(validation.status, 400);
        assert_eq!(validation.message, "document title cannot be empty");

        let missing = ApiError::from_service(
            ServiceError::EntityNotFound(Id::generate()),
            "Document",
            "update document",
        );
        assert_eq!(missing.status, NOT_FOUND);
        assert_eq!(missing.message, "Document not found");

        let conflict = ApiError::from_service(
            ServiceError::IdAlreadySet(IdAlreadySet {
                current: Id::generate(),
            }),
            "Document",
            "create document",
        );
        assert_eq!(conflict.status, CONFLICT);
    }

    #[test]
    fn server_errors_hide_storage_details() {
        let cause = RepoError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery));
        let err = ApiError::from_service(ServiceError::Unknown(cause), "Document", "list documents");
        assert_eq!(err.status, INTERNAL_SERVER_ERROR);
        assert!(err.is_server_error());
        assert_eq!(err.message, "Failed to list documents");
        assert_eq!(err.body().error, "Failed to list documents");
    }
}
