//! Verification of identity-provider session tokens.
//!
//! Sessions are issued and signed by the external identity provider; this
//! service holds the shared HS256 secret and only ever validates.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use portal_core::error::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::IdentityConfig;

/// Claims carried by a provider-issued session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (directory record id)
    pub sub: Uuid,
    /// Email
    pub email: String,
    /// Whether the provider has verified the email
    #[serde(default)]
    pub email_verified: bool,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

#[derive(Clone)]
pub struct IdentityVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl IdentityVerifier {
    pub fn new(config: &IdentityConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Validate and decode a session token. Any failure is Unauthorized.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "unit-test-secret-0123456789abcdef";

    fn verifier() -> IdentityVerifier {
        IdentityVerifier::new(&IdentityConfig {
            jwt_secret: SECRET.to_string(),
        })
    }

    fn token(secret: &str, exp_offset_seconds: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            email: "student@campus.edu".to_string(),
            email_verified: true,
            exp: now + exp_offset_seconds,
            iat: now,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_round_trips() {
        let claims = verifier().verify(&token(SECRET, 3600)).unwrap();
        assert_eq!(claims.email, "student@campus.edu");
        assert!(claims.email_verified);
    }

    #[test]
    fn expired_token_is_rejected() {
        assert!(verifier().verify(&token(SECRET, -3600)).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        assert!(verifier().verify(&token("some-other-secret-entirely", 3600)).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(verifier().verify("not-a-token").is_err());
    }
}
