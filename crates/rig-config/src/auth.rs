//! Token and password-hashing configuration.

use serde::{Deserialize, Serialize};

/// Development fallback. `is_default_secret` lets callers warn about it.
pub const DEFAULT_SECRET_KEY: &str = "change_this_secret";

fn default_secret_key() -> String {
    DEFAULT_SECRET_KEY.to_string()
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

const fn default_access_token_expire_minutes() -> i64 {
    60
}

const fn default_bcrypt_cost() -> u32 {
    12
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HMAC signing secret for bearer tokens.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,

    /// Signing algorithm. Only `HS256` is supported.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: i64,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
            algorithm: default_algorithm(),
            access_token_expire_minutes: default_access_token_expire_minutes(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AuthConfig {
    #[must_use]
    pub fn is_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}
