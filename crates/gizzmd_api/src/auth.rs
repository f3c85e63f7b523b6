//! Bearer token issuance and verification.
//!
//! # Invariants
//! - Tokens are HS256-signed with the secret from [`AuthConfig`].
//! - Verification fails closed: a missing or mistyped claim, an expired
//!   token or a `sub` that is not a UUID is rejected.
//! - Credential checks are delegated to an [`IdentityProvider`].

use crate::config::AuthConfig;
use chrono::{DateTime, Utc};
use gizzmd_core::Id;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TOKEN_TYPE: &str = "Bearer";
const BEARER_PREFIX: &str = "Bearer ";

/// Signed token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub exp: u64,
}

/// Identity established by a credential check or a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Id,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: u64,
}

/// Credential verification collaborator.
pub trait IdentityProvider {
    /// Returns the identity for valid credentials, `None` otherwise.
    fn verify_credentials(&self, username: &str, password: &str) -> Option<AuthenticatedUser>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingHeader,
    MalformedHeader,
    InvalidToken(String),
    InvalidSubject(String),
    InvalidCredentials,
    Signing(String),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHeader => write!(f, "missing Authorization header"),
            Self::MalformedHeader => write!(f, "Authorization header is not a bearer token"),
            Self::InvalidToken(reason) => write!(f, "invalid or expired token: {reason}"),
            Self::InvalidSubject(sub) => write!(f, "token subject is not a valid id: {sub}"),
            Self::InvalidCredentials => {
                write!(f, "the provided username or password is incorrect")
            }
            Self::Signing(reason) => write!(f, "failed to sign token: {reason}"),
        }
    }
}

impl Error for AuthError {}

/// Signs an access token for `user` valid for `config.token_ttl_secs` from `now`.
pub fn issue_access_token(
    config: &AuthConfig,
    user: &AuthenticatedUser,
    now: DateTime<Utc>,
) -> Result<IssuedToken, AuthError> {
    let issued_at = u64::try_from(now.timestamp()).unwrap_or(0);
    let claims = AccessClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        name: user.name.clone(),
        exp: issued_at.saturating_add(config.token_ttl_secs),
    };

    let access_token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|err| AuthError::Signing(err.to_string()))?;

    Ok(IssuedToken {
        access_token,
        expires_in: config.token_ttl_secs,
    })
}

/// Verifies an `Authorization` header value and returns the token identity.
pub fn authenticate_bearer(
    config: &AuthConfig,
    header: Option<&str>,
) -> Result<AuthenticatedUser, AuthError> {
    let header = header
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::MissingHeader)?;
    let token = header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MalformedHeader)?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);
    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|err| AuthError::InvalidToken(err.to_string()))?;

    let claims = data.claims;
    let id = Id::parse(&claims.sub).map_err(|_| AuthError::InvalidSubject(claims.sub.clone()))?;
    if id.is_nil() {
        return Err(AuthError::InvalidSubject(claims.sub));
    }

    Ok(AuthenticatedUser {
        id,
        email: claims.email,
        name: claims.name,
    })
}
