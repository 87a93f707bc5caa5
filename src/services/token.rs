/*
 * Responsibility
 * - ステートレスな署名付きトークンの発行と検証 (HS512)
 * - 有効性は署名 + exp のみで決まる (サーバ側に記録なし、revocation なし)
 * - secret / ttl の不備は起動時エラー (per-request では起きない)
 */
use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::ConfigError;
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies signed, time-bounded tokens carrying a subject.
///
/// Pure function of inputs plus wall-clock time; no observable side effects.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_seconds: u64) -> Result<Self, ConfigError> {
        if secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }
        if ttl_seconds == 0 {
            return Err(ConfigError::Invalid("JWT_TTL_SECONDS"));
        }

        let mut validation = Validation::new(Algorithm::HS512);
        // No leeway: an expired token is expired, full stop.
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_seconds,
        })
    }

    /// Issue a token for `subject` expiring `ttl_seconds` from now.
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        self.issue_with_ttl(subject, self.ttl_seconds as i64)
    }

    fn issue_with_ttl(&self, subject: &str, ttl_seconds: i64) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + ttl_seconds,
        };

        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign token");
            AppError::Internal
        })
    }

    /// Verify signature and expiry, returning the subject.
    ///
    /// Expired and invalid are surfaced distinctly: an expired token warrants a
    /// silent re-login, a bad signature warrants rejection.
    pub fn verify(&self, token: &str) -> Result<String, AppError> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims.sub),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(AppError::TokenExpired),
                _ => Err(AppError::TokenInvalid),
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn issue_expired(&self, subject: &str) -> Result<String, AppError> {
        self.issue_with_ttl(subject, -60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(secret: &str) -> TokenCodec {
        TokenCodec::new(secret, 3600).unwrap()
    }

    #[test]
    fn issue_then_verify_round_trips_subject() {
        let codec = codec("test-secret");
        let token = codec.issue("alice").unwrap();
        assert_eq!(codec.verify(&token).unwrap(), "alice");
    }

    #[test]
    fn already_expired_token_fails_with_token_expired() {
        let codec = codec("test-secret");
        let token = codec.issue_expired("alice").unwrap();
        assert!(matches!(codec.verify(&token), Err(AppError::TokenExpired)));
    }

    #[test]
    fn token_signed_with_different_secret_fails_with_token_invalid() {
        let issuer = codec("secret-a");
        let verifier = codec("secret-b");
        let token = issuer.issue("alice").unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::TokenInvalid)
        ));
    }

    #[test]
    fn malformed_token_fails_with_token_invalid() {
        let codec = codec("test-secret");
        assert!(matches!(
            codec.verify("not-a-token"),
            Err(AppError::TokenInvalid)
        ));
    }

    #[test]
    fn empty_secret_is_a_configuration_error() {
        assert!(matches!(
            TokenCodec::new("", 3600),
            Err(ConfigError::Invalid("JWT_SECRET"))
        ));
    }

    #[test]
    fn zero_ttl_is_a_configuration_error() {
        assert!(matches!(
            TokenCodec::new("test-secret", 0),
            Err(ConfigError::Invalid("JWT_TTL_SECONDS"))
        ));
    }
}
