/*
 * Responsibility
 * - v1 URL structure
 * - /health, /auth/register, /auth/login, /me
 * - The bearer gate wraps this whole router (applied in app.rs); which
 *   routes *require* identity is decided per handler via AuthCtx
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{login, register},
    health::health,
    me::me,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/me", get(me))
}
