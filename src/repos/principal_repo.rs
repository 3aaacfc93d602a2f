/*
 * Responsibility
 * - Principal model (identity + role) as seen by the auth core
 * - PrincipalRepo: the seam to the external user store
 *   (lookup by identifier, registration, credential check)
 */
use async_trait::async_trait;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Granted authorities, Spring-Security-style strings for client parity.
    pub fn authorities(&self) -> Vec<String> {
        match self {
            Role::User => vec!["ROLE_USER".to_string()],
            Role::Admin => vec!["ROLE_ADMIN".to_string(), "ROLE_USER".to_string()],
        }
    }
}

/// An identity the store resolved. Read-only to the auth core; the email is
/// the unique stable identifier tokens are bound to.
#[derive(Debug, Clone)]
pub struct Principal {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

#[derive(Debug)]
pub struct NewPrincipal {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: Role,
}

/// External user store as the auth core consumes it.
///
/// Persistence is deliberately behind this trait; the in-memory
/// implementation in `repos::memory` is the default, a database-backed one
/// would slot in here without touching the core.
#[async_trait]
pub trait PrincipalRepo: Send + Sync {
    /// `Ok(None)` means no such principal (normal for lookups, fatal for
    /// the auth gate — the gate decides, not the store).
    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, RepoError>;

    async fn create(&self, new: NewPrincipal) -> Result<Principal, RepoError>;

    /// Resolve a principal iff `password` matches its stored credential.
    /// `Ok(None)` covers both unknown email and wrong password.
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Principal>, RepoError>;
}
