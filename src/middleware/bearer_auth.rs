/*
 * Responsibility
 * - Once-per-request bearer token check: header extraction → subject
 *   resolution → principal lookup → validation → AuthCtx into extensions
 * - Anonymous requests (missing/foreign scheme/bad/expired token) pass
 *   through untouched; rejecting them is downstream's call, not this layer's
 * - Exception: a verified-looking token naming an unknown principal fails
 *   the request here
 */
use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};
use tracing::warn;

use crate::api::v1::extractors::auth_ctx::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Wrap `router` so every request runs through the bearer gate.
///
/// axum 0.8's `from_fn` cannot take a State extractor, so the state is
/// passed explicitly via `from_fn_with_state`.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, bearer_middleware))
}

async fn bearer_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    // No credentials, or a scheme that is not ours: anonymous pass-through.
    let Some(token) = header_value.and_then(|v| v.strip_prefix("Bearer ")) else {
        return Ok(next.run(req).await);
    };

    // Untrusted input; a token we cannot read leaves the request anonymous
    // rather than failing it. Downstream decides whether identity is needed.
    let subject = match state.tokens.extract_subject(token) {
        Ok(subject) => subject,
        Err(err) => {
            warn!(error = %err, "ignoring unusable bearer token");
            return Ok(next.run(req).await);
        }
    };

    // Re-entrant invocation guard: first authentication wins.
    if req.extensions().get::<AuthCtx>().is_some() {
        return Ok(next.run(req).await);
    }

    // A token that verified against our key but names a subject we have no
    // record of is an anomaly, not a normal anonymous case: fail the request.
    let principal = state
        .principals
        .find_by_email(&subject)
        .await
        .map_err(|err| {
            warn!(error = %err, "principal lookup failed");
            AppError::Internal
        })?
        .ok_or_else(|| {
            warn!(subject = %subject, "bearer token names unknown principal");
            AppError::Unauthorized
        })?;

    if state.tokens.is_valid(token, &principal) {
        // middleware → extractor hand-off
        req.extensions_mut().insert(AuthCtx::for_principal(&principal));
    }

    Ok(next.run(req).await)
}
