use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claim set carried by access and refresh tokens.
///
/// Both token kinds share this exact shape; nothing in the payload tells
/// them apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity id as string)
    pub sub: String,

    /// Free-form role, e.g. "user" or "admin"
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token identifier
    pub jti: String,
}

impl Claims {
    /// Create claims for an identity that expire `lifetime` from now.
    ///
    /// # Arguments
    /// * `subject` - Identity the token is issued for
    /// * `role` - Role recorded for the identity
    /// * `lifetime` - Time until the token expires
    ///
    /// # Returns
    /// Claims with sub, role, iat, exp and a fresh jti
    pub fn for_subject(subject: Uuid, role: impl Into<String>, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            role: role.into(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Override the expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }

    /// A token is only live while `exp` is strictly in the future.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }

    /// Parse the subject back into an identity.
    pub fn subject_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}
