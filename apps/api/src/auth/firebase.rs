//! Firebase ID-token verification.
//!
//! Tokens are RS256 JWTs signed by Google. The signing key is looked up by
//! `kid` in the securetoken JWKS on every call; nothing is cached.

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use serde::Deserialize;

use crate::auth::{TokenError, TokenVerifier, VerifiedIdentity};

pub const GOOGLE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
const ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Claims we read from a Firebase ID token. `exp`, `aud` and `iss` are
/// enforced by `Validation`.
#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
}

pub struct FirebaseTokenVerifier {
    client: Client,
    project_id: String,
    jwks_url: String,
}

impl FirebaseTokenVerifier {
    pub fn new(project_id: String) -> Self {
        Self::with_jwks_url(project_id, GOOGLE_JWKS_URL.to_string())
    }

    pub fn with_jwks_url(project_id: String, jwks_url: String) -> Self {
        Self {
            client: Client::new(),
            project_id,
            jwks_url,
        }
    }

    fn issuer(&self) -> String {
        format!("{ISSUER_PREFIX}{}", self.project_id)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[self.issuer()]);
        validation
    }

    async fn fetch_keys(&self) -> Result<JwkSet, TokenError> {
        let keys = self
            .client
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?
            .json::<JwkSet>()
            .await?;
        Ok(keys)
    }
}

/// Reads the key id without touching the network. Malformed tokens fail here.
fn key_id(token: &str) -> Result<String, TokenError> {
    decode_header(token)?.kid.ok_or(TokenError::MissingKeyId)
}

#[async_trait]
impl TokenVerifier for FirebaseTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, TokenError> {
        let kid = key_id(token)?;

        let keys = self.fetch_keys().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| TokenError::UnknownKeyId(kid.clone()))?;
        let key = DecodingKey::from_jwk(jwk)?;

        let data = decode::<FirebaseClaims>(token, &key, &self.validation())?;
        if data.claims.sub.trim().is_empty() {
            return Err(TokenError::EmptySubject);
        }

        Ok(VerifiedIdentity {
            uid: data.claims.sub,
        })
    }
}
