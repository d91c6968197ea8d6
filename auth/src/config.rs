use secrecy::ExposeSecret;
use secrecy::SecretString;
use thiserror::Error;

/// Error raised when signing material is missing or unusable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Primary signing secret is not configured")]
    MissingPrimarySecret,
}

/// Immutable secret material used to sign and verify tokens.
///
/// Built once at process start and handed to [`crate::TokenCodec`].
/// The secondary secret is only used to sign refresh tokens; when it is
/// absent the primary secret signs both.
pub struct SigningConfig {
    primary: SecretString,
    refresh: Option<SecretString>,
}

impl SigningConfig {
    /// Build a signing configuration.
    ///
    /// # Arguments
    /// * `primary` - Secret used for access tokens and for all validation
    /// * `refresh` - Optional secret used for refresh tokens
    ///
    /// # Errors
    /// * `MissingPrimarySecret` - Primary secret is empty
    pub fn new(primary: impl Into<String>, refresh: Option<String>) -> Result<Self, ConfigError> {
        let primary = primary.into();
        if primary.is_empty() {
            return Err(ConfigError::MissingPrimarySecret);
        }

        // An empty secondary secret counts as not configured
        let refresh = refresh
            .filter(|secret| !secret.is_empty())
            .map(SecretString::new);

        Ok(Self {
            primary: SecretString::new(primary),
            refresh,
        })
    }

    pub fn primary_secret(&self) -> &[u8] {
        self.primary.expose_secret().as_bytes()
    }

    /// Secret for refresh tokens, falling back to the primary secret.
    pub fn refresh_secret(&self) -> &[u8] {
        self.refresh
            .as_ref()
            .unwrap_or(&self.primary)
            .expose_secret()
            .as_bytes()
    }

    pub fn has_refresh_secret(&self) -> bool {
        self.refresh.is_some()
    }
}

impl std::fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningConfig")
            .field("primary", &"[REDACTED]")
            .field("refresh", &self.refresh.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
