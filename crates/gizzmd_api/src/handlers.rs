//! Request handlers.
//!
//! # Responsibility
//! - Parse path/query/body input into core value objects.
//! - Run one service call per request over the caller's connection.
//! - Shape results into response DTOs or an [`ApiError`].
//!
//! # Invariants
//! - Listing parameters never fail the request: an invalid field falls
//!   back to its own default and the other fields are kept.
//! - Path ids that are not UUIDs are rejected before storage is touched.

use crate::auth::{issue_access_token, AuthError, AuthenticatedUser, IdentityProvider, TOKEN_TYPE};
use crate::config::AuthConfig;
use crate::dto::{
    CreateDocRequest, DocResponse, DocSummary, ListDocsParams, ListDocsResponse, LoginRequest,
    LoginResponse, LoginUser, UpdateDocRequest, UpdateUserRequest, UserResponse,
};
use crate::error::{ApiError, ApiResult};
use chrono::Utc;
use gizzmd_core::{
    CreateDocument, DateFilter, DateRange, DocService, DocsQuery, DocumentPatch, Id, Limit, Page,
    SortBy, SortOrder, SqliteDocRepository, SqliteUserRepository, Tags, UserPatch, UserService,
};
use log::{debug, info};
use rusqlite::Connection;

const DOCUMENT: &str = "Document";
const USER: &str = "User";

/// Builds a query from raw listing parameters, one lenient field at a time.
pub fn docs_query_from_params(params: &ListDocsParams) -> DocsQuery {
    let page = provided(&params.page)
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|value| *value > 0)
        .and_then(|value| Page::new(value).ok())
        .unwrap_or_else(|| fallback("page", &params.page));

    let limit = provided(&params.limit)
        .and_then(|raw| raw.parse::<i64>().ok())
        .and_then(|value| Limit::new(value).ok())
        .unwrap_or_else(|| fallback("limit", &params.limit));

    let sort_by = provided(&params.sort_by)
        .and_then(|raw| SortBy::parse(raw).ok())
        .unwrap_or_else(|| fallback("sort_by", &params.sort_by));

    let sort_order = provided(&params.sort_order)
        .and_then(|raw| SortOrder::parse(raw).ok())
        .unwrap_or_else(|| fallback("sort_order", &params.sort_order));

    let tags = provided(&params.tags)
        .and_then(|raw| Tags::parse(raw).ok())
        .unwrap_or_else(|| fallback("tags", &params.tags));

    let created_range = lenient_range(
        "created",
        date_filter("created_from", &params.created_from),
        date_filter("created_to", &params.created_to),
    );
    let updated_range = lenient_range(
        "updated",
        date_filter("updated_from", &params.updated_from),
        date_filter("updated_to", &params.updated_to),
    );

    DocsQuery::new(
        page,
        limit,
        sort_by,
        sort_order,
        tags,
        created_range,
        updated_range,
    )
}

pub fn list_docs(conn: &Connection, params: &ListDocsParams) -> ApiResult<ListDocsResponse> {
    let query = docs_query_from_params(params);
    let listing = doc_service(conn)?
        .list_documents(&query)
        .map_err(|err| ApiError::from_service(err, DOCUMENT, "retrieve documents"))?;

    Ok(ListDocsResponse {
        documents: listing.items.iter().map(DocSummary::from).collect(),
        pagination: listing.pagination,
    })
}

/// Creates a document owned by the authenticated caller.
pub fn create_doc(
    conn: &Connection,
    author: &AuthenticatedUser,
    request: &CreateDocRequest,
) -> ApiResult<DocResponse> {
    let input = CreateDocument {
        title: request.title.clone(),
        content: request.content.clone(),
        tags: request.tags.clone(),
    };
    let doc = doc_service(conn)?
        .create_document(author.id, &input)
        .map_err(|err| ApiError::from_service(err, DOCUMENT, "create document"))?;
    Ok(DocResponse::from(&doc))
}

pub fn get_doc(conn: &Connection, doc_id: &str) -> ApiResult<DocResponse> {
    let id = parse_id(doc_id, "document")?;
    let doc = doc_service(conn)?
        .get_document(id)
        .map_err(|err| ApiError::from_service(err, DOCUMENT, "retrieve document"))?;
    Ok(DocResponse::from(&doc))
}

pub fn update_doc(
    conn: &Connection,
    doc_id: &str,
    request: &UpdateDocRequest,
) -> ApiResult<DocResponse> {
    let id = parse_id(doc_id, "document")?;
    let patch = DocumentPatch {
        title: request.title.clone(),
        content: request.content.clone(),
        tags: request.tags.clone(),
    };
    let doc = doc_service(conn)?
        .update_document(id, &patch)
        .map_err(|err| ApiError::from_service(err, DOCUMENT, "update document"))?;
    Ok(DocResponse::from(&doc))
}

pub fn delete_doc(conn: &Connection, doc_id: &str) -> ApiResult<()> {
    let id = parse_id(doc_id, "document")?;
    doc_service(conn)?
        .delete_document(id)
        .map_err(|err| ApiError::from_service(err, DOCUMENT, "delete document"))
}

/// Returns the authenticated caller's profile.
pub fn get_user(conn: &Connection, caller: &AuthenticatedUser) -> ApiResult<UserResponse> {
    let user = user_service(conn)?
        .get_user(caller.id)
        .map_err(|err| ApiError::from_service(err, USER, "retrieve user"))?;
    Ok(UserResponse::from(&user))
}

pub fn update_user(
    conn: &Connection,
    caller: &AuthenticatedUser,
    request: &UpdateUserRequest,
) -> ApiResult<UserResponse> {
    let patch = UserPatch {
        author_name: request.author_name.clone(),
        ui_theme: request.ui_theme.clone(),
    };
    let user = user_service(conn)?
        .update_user(caller.id, &patch)
        .map_err(|err| ApiError::from_service(err, USER, "update user"))?;
    Ok(UserResponse::from(&user))
}

/// Verifies credentials through `identities` and issues an access token.
pub fn login<P: IdentityProvider>(
    config: &AuthConfig,
    identities: &P,
    request: &LoginRequest,
) -> ApiResult<LoginResponse> {
    let Some(user) = identities.verify_credentials(request.username.trim(), &request.password)
    else {
        info!("event=login module=api status=rejected");
        return Err(AuthError::InvalidCredentials.into());
    };

    let issued = issue_access_token(config, &user, Utc::now())?;
    info!("event=login module=api status=ok user_id={}", user.id);
    Ok(LoginResponse {
        access_token: issued.access_token,
        token_type: TOKEN_TYPE.to_string(),
        expires_in: issued.expires_in,
        user: LoginUser::from(&user),
    })
}

fn doc_service(conn: &Connection) -> ApiResult<DocService<SqliteDocRepository<'_>>> {
    SqliteDocRepository::try_new(conn)
        .map(DocService::new)
        .map_err(|err| ApiError::internal("Storage is not available", &err))
}

fn user_service(conn: &Connection) -> ApiResult<UserService<SqliteUserRepository<'_>>> {
    SqliteUserRepository::try_new(conn)
        .map(UserService::new)
        .map_err(|err| ApiError::internal("Storage is not available", &err))
}

fn parse_id(raw: &str, subject: &str) -> ApiResult<Id> {
    Id::parse(raw.trim()).map_err(|_| ApiError::bad_request(format!("Invalid {subject} ID")))
}

fn provided(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

fn fallback<T: Default>(field: &str, raw: &Option<String>) -> T {
    if provided(raw).is_some() {
        debug!("event=list_param_fallback module=api field={field}");
    }
    T::default()
}

fn date_filter(field: &str, raw: &Option<String>) -> DateFilter {
    provided(raw)
        .and_then(|value| DateFilter::parse(value).ok())
        .unwrap_or_else(|| fallback(field, raw))
}

fn lenient_range(field: &str, from: DateFilter, to: DateFilter) -> DateRange {
    DateRange::new(from, to).unwrap_or_else(|_| {
        debug!("event=list_param_fallback module=api field={field}_range");
        DateRange::default()
    })
}
