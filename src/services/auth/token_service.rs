/*
 * Responsibility
 * - Issue HS256 session tokens (JWT) for a principal
 * - Verify + decode tokens; typed claim accessors (sub / exp / by key)
 * - Sole holder of the signing key material
 */
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::error;

use crate::repos::principal_repo::Principal;

/// Why a presented token cannot be used.
///
/// Callers must be able to tell "cannot trust this token" (bad signature,
/// corrupt structure) apart from "structurally fine but too old".
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed(#[source] jsonwebtoken::errors::Error),

    #[error("expired token")]
    Expired,
}

/// Signing failed. Only happens on a defect (bad key, unserializable claims),
/// never in normal operation.
#[derive(Debug, Error)]
#[error("token issuance failed")]
pub struct IssuanceError(#[source] jsonwebtoken::errors::Error);

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// HS256 token issuer + verifier sharing one symmetric secret.
///
/// There is no rotation and no separate verification key; the secret is
/// fixed for the process lifetime.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenService {
    pub fn new(signing_key: &[u8], ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // jsonwebtoken defaults to 60s leeway; expiry here is exact.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            decoding_key: DecodingKey::from_secret(signing_key),
            validation,
            ttl_seconds,
        }
    }

    /// Issue a token for `principal` with no extra claims.
    pub fn issue(&self, principal: &Principal) -> Result<String, IssuanceError> {
        self.issue_with_claims(principal, Map::new())
    }

    /// Issue a token for `principal`, merging in caller-supplied claims.
    ///
    /// Registered claims always win: `sub`/`iat`/`exp` keys in `extra` are
    /// dropped before signing.
    pub fn issue_with_claims(
        &self,
        principal: &Principal,
        mut extra: Map<String, Value>,
    ) -> Result<String, IssuanceError> {
        extra.remove("sub");
        extra.remove("iat");
        extra.remove("exp");

        let iat = Utc::now().timestamp();
        let claims = Claims {
            sub: principal.email.clone(),
            iat,
            exp: iat + self.ttl_seconds as i64,
            extra,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| {
                error!(error = %e, "failed to sign session token");
                IssuanceError(e)
            },
        )
    }

    /// Subject (principal identifier) embedded in a verified token.
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        Ok(self.decode(token)?.sub)
    }

    /// Expiration instant embedded in a verified token.
    pub fn extract_expiration(&self, token: &str) -> Result<DateTime<Utc>, TokenError> {
        let claims = self.decode(token)?;
        // exp outside the representable range is corrupt, not expired.
        DateTime::from_timestamp(claims.exp, 0).ok_or_else(|| {
            TokenError::Malformed(jsonwebtoken::errors::ErrorKind::InvalidToken.into())
        })
    }

    /// Extra claim by key from a verified token. `None` when the token is
    /// good but carries no such claim.
    pub fn extract_claim(&self, token: &str, key: &str) -> Result<Option<Value>, TokenError> {
        Ok(self.decode(token)?.extra.get(key).cloned())
    }

    /// True iff `token` verifies, names `principal`, and is not yet expired.
    ///
    /// Pure query over an untrusted input: parse/verify failures come back
    /// as `false`, never as an error.
    pub fn is_valid(&self, token: &str, principal: &Principal) -> bool {
        match self.decode(token) {
            Ok(claims) => claims.sub == principal.email,
            Err(_) => false,
        }
    }

    // Signature verification runs on every decode so a tampered token can
    // never yield a trusted claim, even when only one field is read.
    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e),
            })?;

        // The library treats exp == now as still live; the contract here is
        // strict: a token expiring at exactly the current second is expired.
        if Utc::now().timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}
