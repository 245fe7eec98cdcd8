//! Scan pipeline configuration.

use serde::{Deserialize, Serialize};

fn default_tracked_extension() -> String {
    "py".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// File extension (without the dot) selected by scans and directory metadata.
    #[serde(default = "default_tracked_extension")]
    pub tracked_extension: String,

    /// Commit the repository's sync timestamp only once the scan succeeded.
    /// When `false` the timestamp is committed before scanning starts.
    #[serde(default)]
    pub stamp_after_scan: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            tracked_extension: default_tracked_extension(),
            stamp_after_scan: false,
        }
    }
}
