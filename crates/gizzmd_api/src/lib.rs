//! Request-level API for gizzmd.
//!
//! # Responsibility
//! - Translate loosely-typed request input into core value objects.
//! - Map core outcomes to status-classed, client-safe errors.
//! - Issue and verify bearer tokens with an explicitly passed secret.
//!
//! Transport (HTTP server, routing) lives outside this crate; every
//! handler here is a plain synchronous function over a `Connection`.

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

pub use auth::{
    authenticate_bearer, issue_access_token, AccessClaims, AuthError, AuthenticatedUser,
    IdentityProvider, IssuedToken, TOKEN_TYPE,
};
pub use config::{ApiConfig, AppEnv, AuthConfig, ConfigError};
pub use dto::{
    CreateDocRequest, DocResponse, DocSummary, ErrorBody, ListDocsParams, ListDocsResponse,
    LoginRequest, LoginResponse, LoginUser, UpdateDocRequest, UpdateUserRequest, UserResponse,
};
pub use error::{ApiError, ApiResult};
pub use handlers::{
    create_doc, delete_doc, docs_query_from_params, get_doc, get_user, list_docs, login,
    update_doc, update_user,
};
