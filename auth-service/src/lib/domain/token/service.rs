use std::sync::Arc;

use auth::Authenticator;
use auth::TokenError;
use auth::TokenValidation;

use crate::token::errors::ValidationError;
use crate::token::models::ValidationResult;

/// Answers "is this token valid, and whose is it?" for other services.
///
/// Only an empty token is an error; every other failure is a soft
/// invalid result so callers can treat it as "not authenticated".
#[derive(Clone)]
pub struct ValidationService {
    authenticator: Arc<Authenticator>,
}

impl ValidationService {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }

    /// Validate a token.
    ///
    /// # Errors
    /// * `EmptyToken` - Input is empty
    pub fn validate(&self, token: &str) -> Result<ValidationResult, ValidationError> {
        match self.authenticator.validate_token(token) {
            Ok(TokenValidation::Valid(verified)) => {
                tracing::debug!(user_id = %verified.subject, "Token validated");
                Ok(verified.into())
            }
            Ok(TokenValidation::Invalid(reason)) => {
                tracing::debug!(%reason, "Token rejected");
                Ok(ValidationResult::invalid())
            }
            Err(TokenError::EmptyToken) => Err(ValidationError::EmptyToken),
            Err(e) => {
                tracing::warn!(error = %e, "Token validation failed unexpectedly");
                Ok(ValidationResult::invalid())
            }
        }
    }
}
