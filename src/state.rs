/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Clone-cheap by construction (Arcs inside)
 */
use std::sync::Arc;

use crate::repos::principal_repo::PrincipalRepo;
use crate::services::auth::token_service::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub principals: Arc<dyn PrincipalRepo>,
}

impl AppState {
    pub fn new(tokens: Arc<TokenService>, principals: Arc<dyn PrincipalRepo>) -> Self {
        Self { tokens, principals }
    }
}
