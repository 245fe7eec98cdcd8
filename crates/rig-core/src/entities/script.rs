use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FunctionDoc;

/// One cataloged source file of a mirrored repository.
///
/// Identity is `(repo_id, path)`. Every field after `filename` is derived and
/// overwritten on each scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogedScript {
    pub id: String,
    pub repo_id: String,
    /// Absolute path on disk.
    pub path: String,
    pub filename: String,
    pub module_doc: Option<String>,
    pub description: Option<String>,
    pub topology: Option<String>,
    pub author: Option<String>,
    pub functions: Vec<FunctionDoc>,
    /// Reserved. The scan pipeline never writes it.
    pub last_commit: Option<String>,
    pub updated_at: DateTime<Utc>,
}
