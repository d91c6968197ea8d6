use async_trait::async_trait;

use crate::credential::errors::AuthError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::models::EmailAddress;
use crate::credential::models::LoginCommand;
use crate::credential::models::LoginOutcome;
use crate::credential::models::RegisterCommand;
use crate::credential::models::Registration;

/// Port for register and login.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new credential and issue its first token pair.
    ///
    /// # Arguments
    /// * `command` - Validated email and password
    ///
    /// # Returns
    /// Stored credential and token pair
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `Token` - Token generation failed
    /// * `StoreTimeout` / `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Registration, AuthError>;

    /// Check credentials and issue a fresh token pair.
    ///
    /// # Arguments
    /// * `command` - Validated email and presented password
    ///
    /// # Returns
    /// Credential, token pair and login time
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Password` - Stored hash is unusable
    /// * `Token` - Token generation failed
    /// * `StoreTimeout` / `DatabaseError` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError>;
}

/// Persistence operations for credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Check whether an email is already registered.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists(&self, email: &EmailAddress) -> Result<bool, AuthError>;

    /// Persist a new credential with the default role.
    ///
    /// # Arguments
    /// * `email` - Email to register
    /// * `password_hash` - PHC hash of the password
    ///
    /// # Returns
    /// Identifier assigned by the store
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Uniqueness constraint rejected the email
    /// * `DatabaseError` - Database operation failed
    async fn create(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<CredentialId, AuthError>;

    /// Retrieve a credential by identifier.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &CredentialId) -> Result<Option<Credential>, AuthError>;

    /// Retrieve a credential by exact email.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Credential>, AuthError>;
}
