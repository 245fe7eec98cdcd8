use serde::{Deserialize, Serialize};

/// A top-level function definition and its own docstring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDoc {
    pub name: String,
    pub doc: Option<String>,
}

/// Structured metadata extracted from a source file's leading header.
///
/// `Default` is the degraded result for unreadable or undecodable files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptMetadata {
    /// Raw header text (triple-quoted block or leading comment run).
    pub module_doc: String,
    pub description: Option<String>,
    pub topology: Option<String>,
    pub author: Option<String>,
    pub functions: Vec<FunctionDoc>,
}

impl ScriptMetadata {
    /// `true` when nothing at all was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.module_doc.is_empty()
            && self.description.is_none()
            && self.topology.is_none()
            && self.author.is_none()
            && self.functions.is_empty()
    }
}
