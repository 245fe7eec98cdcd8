//! ast-grep wrapper and language detection from file extensions.

use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::SupportLang;

/// The concrete AST tree type returned by `parse_source`.
pub type AstTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// Detect the language of a cataloged file from its extension.
///
/// Only languages with a function extractor are recognized; everything else
/// still gets header extraction.
#[must_use]
pub fn detect_language(file_path: &str) -> Option<SupportLang> {
    let (_, ext) = file_path.rsplit_once('.')?;
    match ext {
        "py" | "pyi" => Some(SupportLang::Python),
        _ => None,
    }
}

/// Parse source text into an ast-grep tree.
#[must_use]
pub fn parse_source(source: &str, lang: SupportLang) -> AstTree {
    use ast_grep_language::LanguageExt;
    lang.ast_grep(source)
}
