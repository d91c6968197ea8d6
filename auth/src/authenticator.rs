use std::sync::OnceLock;

use uuid::Uuid;

use crate::config::SigningConfig;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::jwt::TokenPair;
use crate::jwt::TokenValidation;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds no mutable state; share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    decoy_hash: OnceLock<Option<String>>,
}

/// Plaintext behind the decoy hash.
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-identities";

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `config` - Signing secrets loaded at startup
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(config: &SigningConfig) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(config),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity to issue tokens for
    /// * `role` - Role recorded in the tokens
    ///
    /// # Returns
    /// Access and refresh tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: Uuid,
        role: &str,
    ) -> Result<TokenPair, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_codec.issue_pair(subject, role)?)
    }

    /// Spend one password verification's worth of work for an identity that
    /// does not exist.
    ///
    /// Makes rejecting an unknown identity take as long as rejecting a wrong
    /// password. The decoy hash is computed on first use with the same
    /// parameters as real hashes.
    pub fn verify_decoy(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.password_hasher.hash(DECOY_PASSWORD).ok());

        if let Some(hash) = decoy {
            let _ = self.password_hasher.verify(password, hash);
        }
    }

    /// Issue a token pair without password verification.
    ///
    /// Used right after registration, when the caller has just proven
    /// knowledge of the password by choosing it.
    ///
    /// # Errors
    /// * `SigningFailed` - Token generation failed
    pub fn issue_tokens(&self, subject: Uuid, role: &str) -> Result<TokenPair, TokenError> {
        self.token_codec.issue_pair(subject, role)
    }

    /// Validate a token.
    ///
    /// # Errors
    /// * `EmptyToken` - Input is empty
    pub fn validate_token(&self, token: &str) -> Result<TokenValidation, TokenError> {
        self.token_codec.validate(token)
    }
}
