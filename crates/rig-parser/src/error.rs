//! Parser error types for rig-parser.

use std::path::PathBuf;

/// Errors raised while loading a source file for extraction.
///
/// Extraction itself never fails; callers of [`crate::extract_file_metadata`]
/// only see these through logs.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{} is not valid UTF-8", path.display())]
    Decode { path: PathBuf },
}
