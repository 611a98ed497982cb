//! Code parsing via tree-sitter
//!
//! Parses Go source code into the syntax tree model in [`crate::ast`].

mod go;

use crate::ast::Span;
use crate::error::{Error, Result};
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

pub use go::parse_go;

/// Get raw tree-sitter S-expression for Go source code
///
/// This is useful for debugging what tree-sitter sees vs what the matcher
/// looks for. The S-expression format is a Lisp-like representation of the CST.
pub fn to_sexp(source: &str) -> Result<String> {
    let tree = parse_tree(source)?;
    Ok(tree.root_node().to_sexp())
}

/// Run the tree-sitter Go parser over `source`
pub(crate) fn parse_tree(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| Error::Parse {
            span: Span::default(),
            message: format!("Failed to set language: {}", e),
        })?;

    parser.parse(source, None).ok_or_else(|| Error::Parse {
        span: Span::default(),
        message: "Failed to parse source".into(),
    })
}

/// Whether a path names a Go source file
pub fn is_go_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("go")
}

/// Convert tree-sitter Node position to Span
pub(crate) fn node_span(node: Node) -> Span {
    Span {
        start_line: node.start_position().row + 1,
        start_col: node.start_position().column,
        end_line: node.end_position().row + 1,
        end_col: node.end_position().column,
    }
}
