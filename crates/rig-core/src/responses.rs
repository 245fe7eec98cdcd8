//! Response shapes returned as JSON by the HTTP API and the `rigd` CLI.

use serde::{Deserialize, Serialize};

use crate::entities::{FunctionDoc, MirroredRepo, ScriptMetadata};
use crate::enums::{MirrorAction, SuiteScopeKind};

/// Result of syncing a repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncResponse {
    pub msg: String,
    pub repo: MirroredRepo,
    pub action: MirrorAction,
    pub scripts_count: usize,
}

/// Issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    #[must_use]
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// One child of a browsed directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    /// Path relative to the repository root, `/`-separated.
    pub path: String,
    pub is_dir: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileContent {
    pub path: String,
    pub content: String,
}

/// Live metadata for one file, extracted straight from disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileMetadata {
    pub path: String,
    pub filename: String,
    pub module_doc: String,
    pub description: Option<String>,
    pub topology: Option<String>,
    pub author: Option<String>,
    pub functions: Vec<FunctionDoc>,
}

impl FileMetadata {
    #[must_use]
    pub fn new(path: String, filename: String, metadata: ScriptMetadata) -> Self {
        Self {
            path,
            filename,
            module_doc: metadata.module_doc,
            description: metadata.description,
            topology: metadata.topology,
            author: metadata.author,
            functions: metadata.functions,
        }
    }
}

/// Where a saved suite landed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuiteSaveResponse {
    pub name: String,
    pub scope: SuiteScopeKind,
    pub manifest_path: String,
    pub script_path: String,
    pub files: Vec<String>,
}

/// Runner script content for a saved suite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuiteScriptResponse {
    pub name: String,
    pub scope: SuiteScopeKind,
    pub content: String,
}

/// Result of re-deriving catalog fields from stored module docs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackfillResponse {
    pub scanned: usize,
    pub updated: usize,
}

/// Result of checking out a branch in the current repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutResponse {
    pub repo: String,
    pub branch: Option<String>,
    pub head: Option<String>,
}
