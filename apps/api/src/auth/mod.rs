//! Request authentication: the voice agent's shared secret and optional
//! end-user ID tokens.
//!
//! The shared secret is a hard gate. ID tokens are best effort: a token that
//! fails verification downgrades the request to `Identity::Unverified`, and
//! the caller falls back to the user id supplied in the body.

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::warn;

use crate::errors::AppError;

pub mod firebase;

pub const VAPI_SECRET_HEADER: &str = "x-vapi-secret";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token verification is not configured")]
    NotConfigured,

    #[error("Token header has no key id")]
    MissingKeyId,

    #[error("No signing key matches key id '{0}'")]
    UnknownKeyId(String),

    #[error("Token has an empty subject")]
    EmptySubject,

    #[error("Invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("Failed to fetch signing keys: {0}")]
    KeyFetch(#[from] reqwest::Error),
}

/// Subject of a token whose signature and claims checked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub uid: String,
}

/// Carried in `AppState` as `Arc<dyn TokenVerifier>`.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, TokenError>;
}

/// Rejects every token. Used when no identity provider is configured.
pub struct DisabledVerifier;

#[async_trait]
impl TokenVerifier for DisabledVerifier {
    async fn verify(&self, _token: &str) -> Result<VerifiedIdentity, TokenError> {
        Err(TokenError::NotConfigured)
    }
}

/// Who the request is acting for, after token verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Verified(String),
    Unverified,
}

impl Identity {
    /// A verified subject always wins over the client-supplied id.
    pub fn user_id(self, fallback: Option<String>) -> Option<String> {
        match self {
            Identity::Verified(uid) => Some(uid),
            Identity::Unverified => fallback,
        }
    }
}

/// Rejects the request unless it carries the configured shared secret.
/// With no secret configured every request passes.
pub fn check_shared_secret(expected: Option<&str>, headers: &HeaderMap) -> Result<(), AppError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let provided = headers
        .get(VAPI_SECRET_HEADER)
        .map(|value| value.as_bytes())
        .unwrap_or_default();

    if bool::from(provided.ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// Extracts the token from `Authorization: Bearer <token>`, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Verifies the bearer token if one was sent. Never fails the request.
pub async fn resolve_identity(verifier: &dyn TokenVerifier, headers: &HeaderMap) -> Identity {
    let Some(token) = bearer_token(headers) else {
        return Identity::Unverified;
    };

    match verifier.verify(token).await {
        Ok(identity) => Identity::Verified(identity.uid),
        Err(e) => {
            warn!("Bearer token verification failed, using body userid: {e}");
            Identity::Unverified
        }
    }
}
