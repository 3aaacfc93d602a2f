/*
 * Responsibility
 * - /auth/register and /auth/login handlers
 * - DTO validation → principal store → token issuance; credential policy
 *   itself lives in the store, signing in the token service
 */
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

use crate::api::v1::dto::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::repos::principal_repo::{NewPrincipal, Role};
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REGISTRATION", msg))?;

    let principal = state
        .principals
        .create(NewPrincipal {
            email: req.email.trim().to_string(),
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
            role: Role::User,
        })
        .await?;

    info!(email = %principal.email, "registered new principal");

    let token = state.tokens.issue(&principal)?;
    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_LOGIN", msg))?;

    let principal = state
        .principals
        .verify_credentials(req.email.trim(), &req.password)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let token = state.tokens.issue(&principal)?;
    Ok(Json(AuthResponse { token }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::app::build_router;
    use crate::repos::memory::MemoryPrincipalRepo;
    use crate::repos::principal_repo::PrincipalRepo;
    use crate::services::auth::token_service::TokenService;
    use crate::state::AppState;

    fn state() -> AppState {
        AppState::new(
            Arc::new(TokenService::new(b"0123456789abcdef0123456789abcdef", 3600)),
            Arc::new(MemoryPrincipalRepo::new()),
        )
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn register_alice() -> Request<Body> {
        post(
            "/api/v1/auth/register",
            json!({
                "first_name": "Alice",
                "last_name": "Liddell",
                "email": "alice@example.com",
                "password": "wonderland",
            }),
        )
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn register_returns_a_token_usable_immediately() {
        let state = state();
        let router = build_router(state.clone());

        let response = router.clone().oneshot(register_alice()).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let token = body_json(response).await["token"].as_str().unwrap().to_string();
        let alice = state
            .principals
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(state.tokens.is_valid(&token, &alice));
    }

    #[tokio::test]
    async fn register_rejects_invalid_payload_and_duplicates() {
        let router = build_router(state());

        let bad = post(
            "/api/v1/auth/register",
            json!({
                "first_name": "Alice",
                "last_name": "Liddell",
                "email": "not-an-email",
                "password": "wonderland",
            }),
        );
        let response = router.clone().oneshot(bad).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = router.clone().oneshot(register_alice()).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router.oneshot(register_alice()).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn login_checks_credentials() {
        let router = build_router(state());
        router.clone().oneshot(register_alice()).await.unwrap();

        let ok = post(
            "/api/v1/auth/login",
            json!({ "email": "alice@example.com", "password": "wonderland" }),
        );
        let response = router.clone().oneshot(ok).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_json(response).await["token"].is_string());

        let wrong = post(
            "/api/v1/auth/login",
            json!({ "email": "alice@example.com", "password": "looking-glass" }),
        );
        let response = router.oneshot(wrong).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
