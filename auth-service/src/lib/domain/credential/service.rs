use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::credential::errors::AuthError;
use crate::credential::models::LoginCommand;
use crate::credential::models::LoginOutcome;
use crate::credential::models::RegisterCommand;
use crate::credential::models::Registration;
use crate::credential::ports::AuthServicePort;
use crate::credential::ports::CredentialStore;

/// Domain service implementing register and login.
///
/// Composes a credential store with the stateless [`Authenticator`].
/// Password hashing and verification run on the blocking thread pool.
/// Every store call is bounded by `store_timeout` and never retried.
pub struct AuthService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
    store_timeout: Duration,
}

impl<CS> AuthService<CS>
where
    CS: CredentialStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    /// * `store_timeout` - Upper bound for each store call
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>, store_timeout: Duration) -> Self {
        Self {
            store,
            authenticator,
            store_timeout,
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, AuthError>
    where
        F: Future<Output = Result<T, AuthError>>,
    {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(
                    operation,
                    timeout_ms = self.store_timeout.as_millis() as u64,
                    "Credential store call timed out"
                );
                Err(AuthError::StoreTimeout(self.store_timeout))
            }
        }
    }
}

#[async_trait]
impl<CS> AuthServicePort for AuthService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<Registration, AuthError> {
        let RegisterCommand { email, password } = command;

        if self.bounded("exists", self.store.exists(&email)).await? {
            tracing::debug!("Registration rejected: email already registered");
            return Err(AuthError::EmailAlreadyExists(email.to_string()));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = password.into_inner();
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(|e| AuthError::Unknown(format!("Password hashing task failed: {}", e)))??;

        // The store's uniqueness constraint still wins a concurrent registration race
        let id = self
            .bounded("create", self.store.create(&email, &password_hash))
            .await?;

        let credential = self
            .bounded("find_by_id", self.store.find_by_id(&id))
            .await?
            .ok_or_else(|| AuthError::NotFound(id.to_string()))?;

        let tokens = self
            .authenticator
            .issue_tokens(credential.id.0, &credential.role)?;

        tracing::info!(user_id = %credential.id, role = %credential.role, "Credential registered");

        Ok(Registration { credential, tokens })
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError> {
        let LoginCommand { email, password } = command;

        let Some(credential) = self
            .bounded("find_by_email", self.store.find_by_email(&email))
            .await?
        else {
            let authenticator = Arc::clone(&self.authenticator);
            let password = password.into_inner();
            tokio::task::spawn_blocking(move || authenticator.verify_decoy(&password))
                .await
                .map_err(|e| {
                    AuthError::Unknown(format!("Password verification task failed: {}", e))
                })?;

            tracing::debug!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = password.into_inner();
        let stored_hash = credential.password_hash.clone();
        let subject = credential.id.0;
        let role = credential.role.clone();

        let tokens = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, subject, &role)
        })
        .await
        .map_err(|e| AuthError::Unknown(format!("Password verification task failed: {}", e)))?
        .map_err(|e| {
            let err = AuthError::from(e);
            if matches!(err, AuthError::InvalidCredentials) {
                tracing::debug!(user_id = %credential.id, "Login rejected: password mismatch");
            }
            err
        })?;

        tracing::info!(user_id = %credential.id, "Login succeeded");

        Ok(LoginOutcome {
            credential,
            tokens,
            last_login_at: Utc::now(),
        })
    }
}
