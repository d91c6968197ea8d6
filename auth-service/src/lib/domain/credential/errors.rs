use std::time::Duration;

use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password shape checks done before hashing
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password is required")]
    Empty,

    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Caller-facing classification of every failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request shape
    InvalidArgument,
    /// Email already registered
    Conflict,
    /// Bad credentials, whatever the cause
    Unauthorized,
    /// Missing signing material
    Config,
    /// Store, hashing or signing failure
    Internal,
}

/// Top-level error for register and login
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("User with this email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Credential not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::TokenError),

    #[error("Signing configuration error: {0}")]
    Config(#[from] auth::ConfigError),

    #[error("Credential store timed out after {0:?}")]
    StoreTimeout(Duration),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidEmail(_) | AuthError::InvalidPassword(_) => {
                ErrorKind::InvalidArgument
            }
            AuthError::EmailAlreadyExists(_) => ErrorKind::Conflict,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::Config(_) => ErrorKind::Config,
            AuthError::NotFound(_)
            | AuthError::Password(_)
            | AuthError::Token(_)
            | AuthError::StoreTimeout(_)
            | AuthError::DatabaseError(_)
            | AuthError::Unknown(_) => ErrorKind::Internal,
        }
    }
}

impl From<auth::AuthenticationError> for AuthError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            auth::AuthenticationError::PasswordError(e) => AuthError::Password(e),
            auth::AuthenticationError::TokenError(e) => AuthError::Token(e),
        }
    }
}
