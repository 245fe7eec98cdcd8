use serde::{Deserialize, Serialize};

/// Authenticated caller identity, produced by `rig-auth` from a bearer token.
///
/// Carries data only. Suite storage uses `subject` to pick the per-user area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    /// Username taken from the token's `sub` claim.
    pub subject: String,
    /// Token expiry as a unix timestamp.
    pub expires_at: i64,
}
