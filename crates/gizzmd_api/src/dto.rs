//! Request and response shapes.
//!
//! Timestamps render as RFC3339 with second precision and a `Z` suffix.

use crate::auth::AuthenticatedUser;
use gizzmd_core::{Document, Pagination, User};
use serde::{Deserialize, Serialize};

/// Raw listing parameters. Every field is optional and parsed leniently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListDocsParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub tags: Option<String>,
    pub created_from: Option<String>,
    pub created_to: Option<String>,
    pub updated_from: Option<String>,
    pub updated_to: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateDocRequest {
    pub title: String,
    pub content: String,
    pub tags: String,
}

/// Partial update; absent or empty fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateDocRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_theme: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Full document representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: String,
    pub snippet: String,
    pub author_id: String,
    pub created_at: String,
    pub edited_at: String,
}

impl From<&Document> for DocResponse {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id().to_string(),
            title: doc.title().to_string(),
            content: doc.content().as_str().to_string(),
            tags: doc.tags().to_string(),
            snippet: doc.snippet().as_str().to_string(),
            author_id: doc.author_id().to_string(),
            created_at: doc.created_at().to_rfc3339(),
            edited_at: doc.edited_at().to_rfc3339(),
        }
    }
}

/// Listing row. `preview` is the snippet; `updated_at` is the edit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocSummary {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub tags: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Document> for DocSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id().to_string(),
            title: doc.title().to_string(),
            preview: doc.snippet().as_str().to_string(),
            tags: doc.tags().to_string(),
            created_at: doc.created_at().to_rfc3339(),
            updated_at: doc.edited_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDocsResponse {
    pub documents: Vec<DocSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub author_name: String,
    pub ui_theme: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            author_name: user.author_name().to_string(),
            ui_theme: user.ui_theme().as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<&AuthenticatedUser> for LoginUser {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: LoginUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
