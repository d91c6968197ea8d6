use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::credential::errors::AuthError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::models::EmailAddress;
use crate::credential::models::DEFAULT_ROLE;
use crate::credential::ports::CredentialStore;

/// Process-local credential store.
///
/// Rejects a second credential for the same email exactly like the unique
/// index on `users.email` does.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<HashMap<CredentialId, Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn exists(&self, email: &EmailAddress) -> Result<bool, AuthError> {
        let credentials = self.credentials.read().await;
        Ok(credentials.values().any(|c| &c.email == email))
    }

    async fn create(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<CredentialId, AuthError> {
        // Check and insert under one write lock
        let mut credentials = self.credentials.write().await;

        if credentials.values().any(|c| &c.email == email) {
            return Err(AuthError::EmailAlreadyExists(email.as_str().to_string()));
        }

        let credential = Credential {
            id: CredentialId::new(),
            email: email.clone(),
            password_hash: password_hash.to_string(),
            role: DEFAULT_ROLE.to_string(),
            created_at: Utc::now(),
        };
        let id = credential.id;
        credentials.insert(id, credential);

        Ok(id)
    }

    async fn find_by_id(&self, id: &CredentialId) -> Result<Option<Credential>, AuthError> {
        Ok(self.credentials.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Credential>, AuthError> {
        let credentials = self.credentials.read().await;
        Ok(credentials.values().find(|c| &c.email == email).cloned())
    }
}
