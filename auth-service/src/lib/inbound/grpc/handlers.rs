use crate::domain::token::errors::ValidationError;
use crate::domain::token::models::ValidationResult;

pub mod validate_token;

impl From<ValidationResult> for crate::proto::TokenResponse {
    fn from(result: ValidationResult) -> Self {
        Self {
            valid: result.valid,
            user_id: result.user_id,
            role: result.role,
        }
    }
}

impl From<ValidationError> for tonic::Status {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyToken => tonic::Status::invalid_argument(err.to_string()),
        }
    }
}
