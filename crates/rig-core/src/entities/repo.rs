use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A remote repository mirrored onto local disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirroredRepo {
    pub id: String,
    /// User-chosen name; also the mirror directory name.
    pub name: String,
    pub url: String,
    pub branch: String,
    /// Absolute path of the working copy.
    pub local_path: String,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
