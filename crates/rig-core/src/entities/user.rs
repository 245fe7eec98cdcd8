use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::UserRole;

/// A registered account. The password hash never leaves `rig-db`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}
