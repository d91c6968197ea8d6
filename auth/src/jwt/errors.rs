use std::fmt;

use thiserror::Error;

/// Hard failures of token operations.
///
/// A token that simply fails verification is not an error; see
/// [`crate::TokenValidation::Invalid`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token cannot be empty")]
    EmptyToken,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}

/// Reason a token was reported invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Not three base64url segments, or header/payload not decodable
    Malformed,
    /// Header declares an algorithm other than HS256
    UnsupportedAlgorithm,
    /// MAC does not match the primary secret
    BadSignature,
    /// `exp` is not in the future
    Expired,
    /// `sub` is not a valid identity
    BadSubject,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            InvalidReason::Malformed => "malformed token",
            InvalidReason::UnsupportedAlgorithm => "unsupported signing algorithm",
            InvalidReason::BadSignature => "signature mismatch",
            InvalidReason::Expired => "token expired",
            InvalidReason::BadSubject => "invalid subject",
        };
        f.write_str(reason)
    }
}
