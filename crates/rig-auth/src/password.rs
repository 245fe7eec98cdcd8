//! bcrypt password hashes.

use crate::error::AuthError;

/// Hash `password` with bcrypt at `cost`.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check `password` against a stored hash. A malformed hash never verifies.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(valid) => valid,
        Err(error) => {
            tracing::warn!(%error, "stored password hash is unreadable");
            false
        }
    }
}
