/*
 * Responsibility
 * - The authenticated-context type handlers see
 * - The gate verifies and stores it in request extensions; handlers only
 *   ever take this extractor
 *
 * Notes
 * - Token/signature verification lives in middleware/services, not here
 * - Request-scoped value; never shared across requests
 */
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::repos::principal_repo::Principal;

/// Identity attached to an authenticated request.
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub email: String,
    pub authorities: Vec<String>,
}

impl AuthCtx {
    pub fn for_principal(principal: &Principal) -> Self {
        Self {
            email: principal.email.clone(),
            authorities: principal.role.authorities(),
        }
    }
}

impl<S> FromRequestParts<S> for AuthCtx
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Anonymous requests reach this point; handlers requiring identity
        // reject them here, not in the gate.
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
