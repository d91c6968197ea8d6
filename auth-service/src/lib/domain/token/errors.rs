use thiserror::Error;

/// Hard failures of token validation.
///
/// Everything else about a bad token is reported as a soft invalid result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Token cannot be empty")]
    EmptyToken,
}
