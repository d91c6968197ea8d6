use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::InvalidReason;
use super::errors::TokenError;
use crate::config::SigningConfig;

/// Lifetime of an access token in seconds (1 hour).
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Lifetime of a refresh token in seconds (30 days).
pub const REFRESH_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Access and refresh token issued together for one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token expiry (Unix timestamp)
    pub expires_at: i64,
}

/// Identity recovered from a token that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub subject: Uuid,
    pub role: String,
    pub expires_at: i64,
}

/// Outcome of validating a non-empty token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValidation {
    Valid(VerifiedToken),
    Invalid(InvalidReason),
}

impl TokenValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenValidation::Valid(_))
    }
}

/// Issues and verifies compact HS256 tokens.
///
/// Access tokens are signed with the primary secret, refresh tokens with the
/// refresh secret. Validation always uses the primary secret and accepts
/// HS256 only.
pub struct TokenCodec {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec from the process signing configuration.
    ///
    /// # Arguments
    /// * `config` - Signing secrets loaded at startup
    ///
    /// # Returns
    /// TokenCodec configured with HS256
    pub fn new(config: &SigningConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.primary_secret()),
            refresh_key: EncodingKey::from_secret(config.refresh_secret()),
            decoding_key: DecodingKey::from_secret(config.primary_secret()),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a one-hour access token.
    ///
    /// # Arguments
    /// * `subject` - Identity the token is issued for
    /// * `role` - Role recorded in the token
    ///
    /// # Returns
    /// Token string and its expiry (Unix timestamp)
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue_access_token(
        &self,
        subject: Uuid,
        role: &str,
    ) -> Result<(String, i64), TokenError> {
        let claims =
            Claims::for_subject(subject, role, Duration::seconds(ACCESS_TOKEN_TTL_SECS));
        let token = self.sign(&claims, &self.access_key)?;

        Ok((token, claims.exp))
    }

    /// Issue a thirty-day refresh token.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue_refresh_token(&self, subject: Uuid, role: &str) -> Result<String, TokenError> {
        let claims =
            Claims::for_subject(subject, role, Duration::seconds(REFRESH_TOKEN_TTL_SECS));
        self.sign(&claims, &self.refresh_key)
    }

    /// Issue an access and a refresh token for the same identity.
    ///
    /// Either both tokens are returned or the call fails as a whole.
    ///
    /// # Errors
    /// * `SigningFailed` - Either token could not be encoded
    pub fn issue_pair(&self, subject: Uuid, role: &str) -> Result<TokenPair, TokenError> {
        let (access_token, expires_at) = self.issue_access_token(subject, role)?;
        let refresh_token = self.issue_refresh_token(subject, role)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_at,
        })
    }

    /// Verify a token and recover the identity it was issued for.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    ///
    /// # Returns
    /// `Valid` with subject and role, or `Invalid` with the reason
    ///
    /// # Errors
    /// * `EmptyToken` - Input is empty
    pub fn validate(&self, token: &str) -> Result<TokenValidation, TokenError> {
        if token.is_empty() {
            return Err(TokenError::EmptyToken);
        }

        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let claims = match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => data.claims,
            Err(e) => return Ok(TokenValidation::Invalid(invalid_reason(e.kind()))),
        };

        if claims.is_expired(Utc::now().timestamp()) {
            return Ok(TokenValidation::Invalid(InvalidReason::Expired));
        }

        let Some(subject) = claims.subject_id() else {
            return Ok(TokenValidation::Invalid(InvalidReason::BadSubject));
        };

        Ok(TokenValidation::Valid(VerifiedToken {
            subject,
            role: claims.role,
            expires_at: claims.exp,
        }))
    }

    fn sign(&self, claims: &Claims, key: &EncodingKey) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, key).map_err(|e| TokenError::SigningFailed(e.to_string()))
    }
}

fn invalid_reason(kind: &ErrorKind) -> InvalidReason {
    match kind {
        ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => {
            InvalidReason::UnsupportedAlgorithm
        }
        ErrorKind::InvalidSignature => InvalidReason::BadSignature,
        ErrorKind::ExpiredSignature => InvalidReason::Expired,
        _ => InvalidReason::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    use super::*;

    const SECRET: &str = "test_secret_key_at_least_32_bytes!";

    fn codec() -> TokenCodec {
        TokenCodec::new(&SigningConfig::new(SECRET, None).unwrap())
    }

    fn expect_valid(validation: TokenValidation) -> VerifiedToken {
        match validation {
            TokenValidation::Valid(verified) => verified,
            TokenValidation::Invalid(reason) => panic!("expected valid token, got {}", reason),
        }
    }

    #[test]
    fn test_issue_and_validate_access_token() {
        let codec = codec();
        let subject = Uuid::new_v4();

        let (token, expires_at) = codec.issue_access_token(subject, "admin").unwrap();
        let verified = expect_valid(codec.validate(&token).unwrap());

        assert_eq!(verified.subject, subject);
        assert_eq!(verified.role, "admin");
        assert_eq!(verified.expires_at, expires_at);
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_access_token_expires_in_one_hour() {
        let now = Utc::now().timestamp();
        let (_, expires_at) = codec().issue_access_token(Uuid::new_v4(), "user").unwrap();

        assert!((expires_at - (now + ACCESS_TOKEN_TTL_SECS)).abs() <= 2);
    }

    #[test]
    fn test_refresh_token_expires_in_thirty_days() {
        let codec = codec();
        let now = Utc::now().timestamp();

        let token = codec.issue_refresh_token(Uuid::new_v4(), "user").unwrap();
        let verified = expect_valid(codec.validate(&token).unwrap());

        assert!((verified.expires_at - (now + REFRESH_TOKEN_TTL_SECS)).abs() <= 2);
    }

    #[test]
    fn test_issue_pair() {
        let codec = codec();
        let subject = Uuid::new_v4();

        let pair = codec.issue_pair(subject, "user").unwrap();

        assert_ne!(pair.access_token, pair.refresh_token);
        let access = expect_valid(codec.validate(&pair.access_token).unwrap());
        assert_eq!(access.expires_at, pair.expires_at);
        assert_eq!(access.subject, subject);
    }

    #[test]
    fn test_tokens_for_same_subject_differ() {
        let codec = codec();
        let subject = Uuid::new_v4();

        let (first, _) = codec.issue_access_token(subject, "user").unwrap();
        let (second, _) = codec.issue_access_token(subject, "user").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_refresh_signed_with_separate_secret_is_not_accepted_by_validate() {
        let config =
            SigningConfig::new(SECRET, Some("another_refresh_secret_32_bytes!!".to_string()))
                .unwrap();
        let codec = TokenCodec::new(&config);

        let token = codec.issue_refresh_token(Uuid::new_v4(), "user").unwrap();

        assert_eq!(
            codec.validate(&token).unwrap(),
            TokenValidation::Invalid(InvalidReason::BadSignature)
        );
    }

    #[test]
    fn test_empty_token_is_an_error() {
        assert_eq!(codec().validate(""), Err(TokenError::EmptyToken));
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        let codec = codec();

        for token in ["invalid.token.here", "no-dots-at-all", "a.b", "..."] {
            assert_eq!(
                codec.validate(token).unwrap(),
                TokenValidation::Invalid(InvalidReason::Malformed),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let codec = codec();
        let claims = Claims::for_subject(Uuid::new_v4(), "user", Duration::hours(1))
            .with_expiration(Utc::now().timestamp() - 10);
        let token = codec.sign(&claims, &codec.access_key).unwrap();

        assert_eq!(
            codec.validate(&token).unwrap(),
            TokenValidation::Invalid(InvalidReason::Expired)
        );
    }

    #[test]
    fn test_token_expiring_now_is_invalid() {
        let codec = codec();
        let claims = Claims::for_subject(Uuid::new_v4(), "user", Duration::hours(1))
            .with_expiration(Utc::now().timestamp());
        let token = codec.sign(&claims, &codec.access_key).unwrap();

        assert!(!codec.validate(&token).unwrap().is_valid());
    }

    #[test]
    fn test_every_signature_bit_flip_is_invalid() {
        let codec = codec();
        let (token, _) = codec.issue_access_token(Uuid::new_v4(), "user").unwrap();

        let (signing_input, signature) = token.rsplit_once('.').unwrap();
        let signature = URL_SAFE_NO_PAD.decode(signature).unwrap();

        for bit in 0..signature.len() * 8 {
            let mut mutated = signature.clone();
            mutated[bit / 8] ^= 1 << (bit % 8);
            let tampered = format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(&mutated));

            assert_eq!(
                codec.validate(&tampered).unwrap(),
                TokenValidation::Invalid(InvalidReason::BadSignature),
                "bit {}",
                bit
            );
        }
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let codec = codec();
        let (token, _) = codec.issue_access_token(Uuid::new_v4(), "user").unwrap();
        let segments: Vec<&str> = token.split('.').collect();

        let mut claims: Claims =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[1]).unwrap()).unwrap();
        claims.role = "admin".to_string();
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let tampered = format!("{}.{}.{}", segments[0], payload, segments[2]);

        assert_eq!(
            codec.validate(&tampered).unwrap(),
            TokenValidation::Invalid(InvalidReason::BadSignature)
        );
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let other_config = SigningConfig::new("some_other_secret_32_bytes_long!!", None).unwrap();
        let other = TokenCodec::new(&other_config);
        let (token, _) = other.issue_access_token(Uuid::new_v4(), "user").unwrap();

        assert_eq!(
            codec().validate(&token).unwrap(),
            TokenValidation::Invalid(InvalidReason::BadSignature)
        );
    }

    #[test]
    fn test_other_hmac_algorithm_is_rejected() {
        let claims = Claims::for_subject(Uuid::new_v4(), "user", Duration::hours(1));
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            codec().validate(&token).unwrap(),
            TokenValidation::Invalid(InvalidReason::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn test_asymmetric_algorithm_header_is_rejected() {
        let claims = Claims::for_subject(Uuid::new_v4(), "admin", Duration::hours(1));
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let token = format!("{}.{}.{}", header, payload, URL_SAFE_NO_PAD.encode(b"forged"));

        assert_eq!(
            codec().validate(&token).unwrap(),
            TokenValidation::Invalid(InvalidReason::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn test_none_algorithm_is_rejected() {
        let claims = Claims::for_subject(Uuid::new_v4(), "admin", Duration::hours(1));
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());

        for token in [
            format!("{}.{}.", header, payload),
            format!("{}.{}", header, payload),
        ] {
            assert!(!codec().validate(&token).unwrap().is_valid());
        }
    }

    #[test]
    fn test_non_uuid_subject_is_invalid() {
        let codec = codec();
        let mut claims = Claims::for_subject(Uuid::new_v4(), "user", Duration::hours(1));
        claims.sub = "user123".to_string();
        let token = codec.sign(&claims, &codec.access_key).unwrap();

        assert_eq!(
            codec.validate(&token).unwrap(),
            TokenValidation::Invalid(InvalidReason::BadSubject)
        );
    }
}
