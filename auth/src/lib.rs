//! Credential and token primitives for the identity service.
//!
//! - Password hashing (Argon2id)
//! - HS256 token issuance and validation
//! - Authentication coordination
//!
//! Everything here is synchronous and free of I/O. Secrets are injected once
//! through [`SigningConfig`]; nothing reads the environment.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SigningConfig, TokenValidation};
//! use uuid::Uuid;
//!
//! let config = SigningConfig::new("secret_key_at_least_32_bytes_long!", None).unwrap();
//! let auth = Authenticator::new(&config);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let user_id = Uuid::new_v4();
//! let tokens = auth.authenticate("password123", &hash, user_id, "user").unwrap();
//!
//! // Any service: validate
//! match auth.validate_token(&tokens.access_token).unwrap() {
//!     TokenValidation::Valid(verified) => assert_eq!(verified.subject, user_id),
//!     TokenValidation::Invalid(reason) => panic!("{}", reason),
//! }
//! ```

pub mod authenticator;
pub mod config;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use config::ConfigError;
pub use config::SigningConfig;
pub use jwt::Claims;
pub use jwt::InvalidReason;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TokenPair;
pub use jwt::TokenValidation;
pub use jwt::VerifiedToken;
pub use password::PasswordError;
pub use password::PasswordHasher;
