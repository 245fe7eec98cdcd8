//! Top-level Python function listing.
//!
//! Walks only the module's direct children, so methods and nested functions
//! are not reported.

use ast_grep_core::Node;
use ast_grep_language::SupportLang;
use rig_core::entities::FunctionDoc;

use crate::header::dedent;
use crate::parser::parse_source;

/// Top-level `def` / `async def` definitions (decorated or not), in source order.
#[must_use]
pub fn top_level_functions(source: &str) -> Vec<FunctionDoc> {
    let tree = parse_source(source, SupportLang::Python);
    let root = tree.root();
    root.children()
        .filter_map(|child| match child.kind().as_ref() {
            "function_definition" => function_doc(&child),
            "decorated_definition" => child
                .children()
                .find(|c| c.kind().as_ref() == "function_definition")
                .and_then(|inner| function_doc(&inner)),
            _ => None,
        })
        .collect()
}

fn function_doc<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<FunctionDoc> {
    let name = node.field("name").map(|n| n.text().to_string())?;
    Some(FunctionDoc {
        name,
        doc: docstring(node),
    })
}

/// The docstring of a definition: a string literal as the first body statement.
fn docstring<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<String> {
    let body = node.field("body")?;
    let first = body.children().next()?;
    if first.kind().as_ref() != "expression_statement" {
        return None;
    }
    let literal = first.children().find(|c| c.kind().as_ref() == "string")?;
    let raw = literal.text();
    let doc = dedent(strip_quotes(&raw));
    (!doc.is_empty()).then_some(doc)
}

fn strip_quotes(literal: &str) -> &str {
    let unprefixed = literal.trim_start_matches(['r', 'R', 'u', 'U', 'b', 'B']);
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if let Some(inner) = unprefixed
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return inner;
        }
    }
    unprefixed
}
