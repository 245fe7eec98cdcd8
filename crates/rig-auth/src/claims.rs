use rig_core::identity::AuthIdentity;
use serde::{Deserialize, Serialize};

/// Claims carried by a rig bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RigClaims {
    /// Username of the account the token was issued to.
    pub sub: String,
    /// Expiry, unix seconds.
    pub exp: i64,
    /// Issue time, unix seconds.
    pub iat: i64,
}

impl RigClaims {
    #[must_use]
    pub fn to_identity(&self) -> AuthIdentity {
        AuthIdentity {
            subject: self.sub.clone(),
            expires_at: self.exp,
        }
    }

    #[must_use]
    pub const fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}
