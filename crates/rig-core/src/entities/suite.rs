use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::SuiteScopeKind;

/// A named, ordered group of repository files, persisted as `<name>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteManifest {
    pub name: String,
    pub repository: String,
    pub scope: SuiteScopeKind,
    /// Repository-relative paths, in run order.
    pub files: Vec<String>,
    pub saved_at: DateTime<Utc>,
}

/// Listing entry for a stored suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub name: String,
    pub files: Vec<String>,
    pub saved_at: DateTime<Utc>,
}

impl From<SuiteManifest> for SuiteSummary {
    fn from(manifest: SuiteManifest) -> Self {
        Self {
            name: manifest.name,
            files: manifest.files,
            saved_at: manifest.saved_at,
        }
    }
}
