//! HS256 JSON Web Tokens.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rig_config::AuthConfig;

use crate::claims::RigClaims;
use crate::error::AuthError;

/// Issues and validates bearer tokens with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: &str, ttl: TimeDelta) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            &config.secret_key,
            TimeDelta::minutes(config.access_token_expire_minutes),
        )
    }

    /// Issue a token for `subject`, valid for the configured lifetime.
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = RigClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        self.encode(&claims)
    }

    /// Sign arbitrary claims.
    pub fn encode(&self, claims: &RigClaims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// Check signature and expiry, returning the claims.
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidToken` for malformed or tampered tokens,
    /// `AuthError::TokenExpired` once `exp` has passed.
    pub fn validate(&self, token: &str) -> Result<RigClaims, AuthError> {
        let data = jsonwebtoken::decode::<RigClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;
        // The library still accepts `exp == now`.
        if data.claims.is_expired_at(Utc::now().timestamp()) {
            return Err(AuthError::TokenExpired);
        }
        Ok(data.claims)
    }
}
