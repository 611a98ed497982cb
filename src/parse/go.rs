//! Go front-end - builds the syntax tree model from a tree-sitter-go CST

use crate::ast::*;
use crate::error::{Error, Result};
use std::ops::Range;
use tree_sitter::Node;

use super::{node_span, parse_tree};

/// Node kinds whose text is never split into children
const OPAQUE_KINDS: &[&str] = &[
    "interpreted_string_literal",
    "raw_string_literal",
    "rune_literal",
];

pub fn parse_go(source: &str) -> Result<SourceTree> {
    let tree = parse_tree(source)?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(describe_error(root, source));
    }

    let builder = TreeBuilder { source };
    let root = builder.build(root, 0..source.len());

    Ok(SourceTree {
        source: source.to_string(),
        root,
    })
}

/// Locate the first ERROR or MISSING node and turn it into a parse error
fn describe_error(root: Node, source: &str) -> Error {
    let bad = first_error(root).unwrap_or(root);
    let message = if bad.is_missing() {
        format!("missing `{}`", bad.kind())
    } else {
        let text = bad.utf8_text(source.as_bytes()).unwrap_or("");
        let excerpt: String = text.chars().take(40).collect();
        format!("unexpected `{}`", excerpt.trim())
    };
    Error::Parse {
        span: node_span(bad),
        message,
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

struct TreeBuilder<'s> {
    source: &'s str,
}

impl<'s> TreeBuilder<'s> {
    fn text(&self, node: Node) -> &'s str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn build(&self, node: Node, range: Range<usize>) -> SyntaxNode {
        let mut children = Vec::new();
        let mut comments = Vec::new();

        if !OPAQUE_KINDS.contains(&node.kind()) {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if child.kind() == "comment" {
                    comments.push(child.byte_range());
                } else {
                    let child = collapse(child);
                    children.push(self.build(child, child.byte_range()));
                }
            }
        }

        let mut syntax = SyntaxNode {
            kind: self.classify(node),
            origin: Origin::Parsed {
                span: node_span(node),
                range,
            },
            children,
            decorations: Decorations::default(),
        };
        self.decorate(&mut syntax, &comments);
        syntax
    }

    fn classify(&self, node: Node) -> NodeKind {
        match node.kind() {
            "source_file" => NodeKind::SourceFile,
            "call_expression" => NodeKind::CallExpression,
            "selector_expression" => NodeKind::SelectorExpression,
            "identifier" | "field_identifier" | "type_identifier" | "package_identifier" => {
                NodeKind::Identifier(self.text(node).to_string())
            }
            "argument_list" => NodeKind::ArgumentList,
            "unary_expression" => {
                let op = node
                    .child_by_field_name("operator")
                    .or_else(|| node.child(0))
                    .map(|op| self.text(op))
                    .unwrap_or("");
                NodeKind::UnaryExpression(op.to_string())
            }
            "composite_literal" => NodeKind::CompositeValue,
            "literal_value" => NodeKind::LiteralValue,
            "keyed_element" => NodeKind::KeyValueField,
            other => NodeKind::Other(other.to_string()),
        }
    }

    /// Hand the comments found between `node`'s children to those children
    fn decorate(&self, node: &mut SyntaxNode, comments: &[Range<usize>]) {
        let Some(range) = node.slot_range() else {
            return;
        };

        for comment in comments {
            let text = self.source[comment.clone()].trim_end().to_string();
            let before = node
                .children
                .iter()
                .take_while(|c| c.slot_range().is_some_and(|r| r.end <= comment.start))
                .count();

            if before > 0 {
                let prev_end = node.children[before - 1]
                    .slot_range()
                    .map_or(range.start, |r| r.end);
                if !self.source[prev_end..comment.start].contains('\n') {
                    let prev = &mut node.children[before - 1].decorations;
                    prev.trailing = Some(match prev.trailing.take() {
                        Some(existing) => format!("{} {}", existing, text),
                        None => text,
                    });
                    continue;
                }
            }

            if let Some(next) = node.children.get_mut(before) {
                next.decorations.leading.push(text);
            } else if let Some(last) = node.children.last_mut() {
                last.decorations.dangling.push(text);
            } else {
                node.decorations.inner.push(text);
            }
        }

        // Leading comments are always the last ones in the gap before a child
        let mut gap_start = range.start;
        for child in &mut node.children {
            let Some(child_range) = child.slot_range() else {
                continue;
            };
            let in_gap: Vec<&Range<usize>> = comments
                .iter()
                .filter(|c| c.start >= gap_start && c.end <= child_range.start)
                .collect();
            let first_leading = in_gap.len() - child.decorations.leading.len().min(in_gap.len());
            let gap_end = in_gap
                .get(first_leading)
                .map_or(child_range.start, |c| c.start);
            let from = first_leading
                .checked_sub(1)
                .and_then(|i| in_gap.get(i))
                .map_or(gap_start, |c| c.end);
            child.decorations.before = spacing(&self.source[from..gap_end]);
            gap_start = child_range.end;
        }
    }
}

/// `literal_element` only wraps a single expression; drop the wrapper
fn collapse(mut node: Node) -> Node {
    while node.kind() == "literal_element" {
        let mut cursor = node.walk();
        let inner: Vec<_> = node
            .named_children(&mut cursor)
            .filter(|c| c.kind() != "comment")
            .collect();
        match inner.as_slice() {
            [only] if only.byte_range() == node.byte_range() => node = *only,
            _ => break,
        }
    }
    node
}

fn spacing(gap: &str) -> Spacing {
    match gap.matches('\n').count() {
        0 => Spacing::None,
        1 => Spacing::NewLine,
        _ => Spacing::EmptyLine,
    }
}
