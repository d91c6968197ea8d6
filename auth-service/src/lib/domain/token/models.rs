use auth::VerifiedToken;

/// Outcome of validating a token.
///
/// An invalid token carries empty `user_id` and `role`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub user_id: String,
    pub role: String,
}

impl ValidationResult {
    pub fn invalid() -> Self {
        Self {
            valid: false,
            user_id: String::new(),
            role: String::new(),
        }
    }
}

impl From<VerifiedToken> for ValidationResult {
    fn from(verified: VerifiedToken) -> Self {
        Self {
            valid: true,
            user_id: verified.subject.to_string(),
            role: verified.role,
        }
    }
}
