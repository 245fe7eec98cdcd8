//! # rig-parser
//!
//! Metadata extraction for cataloged script files.
//!
//! A file's *header* is its first triple-quoted block (within the first
//! 4 KiB) or, failing that, its run of leading `#` / `//` comments. The
//! description, topology, and author fields are read from the header;
//! Python files additionally get a list of their top-level functions
//! (parsed with ast-grep).
//!
//! Extraction never fails: unreadable or undecodable files produce
//! [`ScriptMetadata::default()`].

mod error;
pub mod fields;
pub mod functions;
pub mod header;
pub mod parser;

pub use error::ParserError;
pub use fields::{HeaderFields, extract_fields};
pub use header::locate_header;
pub use parser::detect_language;

use std::path::Path;

use ast_grep_language::SupportLang;
use rig_core::entities::ScriptMetadata;

/// Extract metadata from Python source text.
#[must_use]
pub fn extract_metadata(source: &str) -> ScriptMetadata {
    extract_with_language(source, Some(SupportLang::Python))
}

/// Extract metadata, listing functions only when `lang` has an extractor.
#[must_use]
pub fn extract_with_language(source: &str, lang: Option<SupportLang>) -> ScriptMetadata {
    let module_doc = locate_header(source);
    let HeaderFields {
        description,
        topology,
        author,
    } = extract_fields(&module_doc);
    let functions = if matches!(lang, Some(SupportLang::Python)) {
        functions::top_level_functions(source)
    } else {
        Vec::new()
    };

    ScriptMetadata {
        module_doc,
        description,
        topology,
        author,
        functions,
    }
}

/// Read a file as UTF-8 text.
///
/// # Errors
/// Returns `ParserError::Io` if the file cannot be read and
/// `ParserError::Decode` if it is not valid UTF-8.
pub fn read_source(path: &Path) -> Result<String, ParserError> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|_| ParserError::Decode {
        path: path.to_path_buf(),
    })
}

/// Extract metadata from a file on disk, degrading to empty metadata when
/// the file cannot be read or decoded.
#[must_use]
pub fn extract_file_metadata(path: &Path) -> ScriptMetadata {
    match read_source(path) {
        Ok(source) => {
            let lang = detect_language(&path.to_string_lossy());
            extract_with_language(&source, lang)
        }
        Err(error) => {
            tracing::debug!(path = %path.display(), %error, "metadata extraction skipped");
            ScriptMetadata::default()
        }
    }
}
