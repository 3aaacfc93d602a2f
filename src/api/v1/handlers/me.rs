/*
 * Responsibility
 * - Downstream consumer of the authenticated context
 * - Anonymous requests are rejected by the AuthCtx extractor (401)
 */
use axum::Json;
use serde::Serialize;

use crate::api::v1::extractors::AuthCtx;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub email: String,
    pub authorities: Vec<String>,
}

pub async fn me(ctx: AuthCtx) -> Json<MeResponse> {
    Json(MeResponse {
        email: ctx.email,
        authorities: ctx.authorities,
    })
}
