/*
 * Responsibility
 * - In-memory PrincipalRepo (HashMap behind an RwLock)
 * - Credential digesting stays inside the store; the auth core never
 *   sees password material
 */
use std::collections::HashMap;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::repos::error::RepoError;
use crate::repos::principal_repo::{NewPrincipal, Principal, PrincipalRepo};

#[derive(Debug, Clone)]
struct StoredPrincipal {
    principal: Principal,
    password_digest: [u8; 32],
}

fn digest(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}

#[derive(Debug, Default)]
pub struct MemoryPrincipalRepo {
    // Keyed by email (the unique identifier).
    inner: RwLock<HashMap<String, StoredPrincipal>>,
}

impl MemoryPrincipalRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PrincipalRepo for MemoryPrincipalRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, RepoError> {
        let map = self.inner.read().await;
        Ok(map.get(email).map(|s| s.principal.clone()))
    }

    async fn create(&self, new: NewPrincipal) -> Result<Principal, RepoError> {
        let mut map = self.inner.write().await;
        if map.contains_key(&new.email) {
            return Err(RepoError::DuplicateEmail);
        }

        let principal = Principal {
            email: new.email.clone(),
            first_name: new.first_name,
            last_name: new.last_name,
            role: new.role,
        };
        map.insert(
            new.email,
            StoredPrincipal {
                principal: principal.clone(),
                password_digest: digest(&new.password),
            },
        );

        Ok(principal)
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Principal>, RepoError> {
        let map = self.inner.read().await;
        Ok(map
            .get(email)
            .filter(|s| s.password_digest == digest(password))
            .map(|s| s.principal.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::principal_repo::Role;

    fn new_alice() -> NewPrincipal {
        NewPrincipal {
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            password: "wonderland".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn create_then_find() {
        let repo = MemoryPrincipalRepo::new();
        repo.create(new_alice()).await.unwrap();

        let found = repo.find_by_email("alice@example.com").await.unwrap();
        assert_eq!(found.unwrap().first_name, "Alice");
        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = MemoryPrincipalRepo::new();
        repo.create(new_alice()).await.unwrap();

        assert!(matches!(
            repo.create(new_alice()).await,
            Err(RepoError::DuplicateEmail)
        ));
    }

    #[tokio::test]
    async fn credentials_must_match() {
        let repo = MemoryPrincipalRepo::new();
        repo.create(new_alice()).await.unwrap();

        assert!(
            repo.verify_credentials("alice@example.com", "wonderland")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            repo.verify_credentials("alice@example.com", "looking-glass")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            repo.verify_credentials("nobody@example.com", "wonderland")
                .await
                .unwrap()
                .is_none()
        );
    }
}
