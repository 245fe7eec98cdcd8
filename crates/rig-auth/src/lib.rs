//! # rig-auth
//!
//! Credentials for the rig API: bcrypt password hashes and HS256 bearer
//! tokens whose `sub` claim is the username.

pub mod bearer;
pub mod claims;
mod error;
pub mod password;
pub mod token;

pub use bearer::parse_bearer;
pub use claims::RigClaims;
pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use token::TokenIssuer;
