//! Syntax tree model
//!
//! A Go source file held as an owned tree of [`SyntaxNode`]s. Parsed nodes
//! remember the byte range they came from, so the printer can reproduce
//! untouched regions verbatim. Synthesized nodes carry no text at all and are
//! laid out by the printer.
//!
//! Comments are not tree nodes. The front-end turns them into [`Decorations`]
//! on the neighbouring node, so a node moved to a new parent takes its
//! comments with it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Source location
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// Node discriminant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of a file
    SourceFile,

    /// `callee(args)`
    CallExpression,

    /// `operand.member`
    SelectorExpression,

    /// Any plain name: identifiers, field, type and package identifiers
    Identifier(String),

    /// Parenthesized call arguments
    ArgumentList,

    /// Prefix operator applied to one operand
    UnaryExpression(String),

    /// `Type{...}`, children are the type and a [`NodeKind::LiteralValue`]
    CompositeValue,

    /// The braced element list of a composite value
    LiteralValue,

    /// `key: value` inside a literal value
    KeyValueField,

    /// Payload placeholder when the payload key was never assigned
    Unset,

    /// Any other tree-sitter node kind, kept opaque
    Other(String),
}

impl NodeKind {
    /// Short human-readable name used in diagnostics
    pub fn describe(&self) -> &str {
        match self {
            NodeKind::SourceFile => "source file",
            NodeKind::CallExpression => "call expression",
            NodeKind::SelectorExpression => "selector expression",
            NodeKind::Identifier(_) => "identifier",
            NodeKind::ArgumentList => "argument list",
            NodeKind::UnaryExpression(_) => "unary expression",
            NodeKind::CompositeValue => "composite literal",
            NodeKind::LiteralValue => "literal value",
            NodeKind::KeyValueField => "key/value field",
            NodeKind::Unset => "unset value",
            NodeKind::Other(kind) => kind,
        }
    }
}

/// Where a node came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Produced by the front-end from this byte range of the source
    Parsed { range: Range<usize>, span: Span },

    /// Built by the rewriter. `replaces` is the byte range of the slot it was
    /// substituted into, if it took the place of a parsed node.
    Synthesized { replaces: Option<Range<usize>> },
}

/// Blank-line hint before a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Spacing {
    #[default]
    None,
    NewLine,
    EmptyLine,
}

/// Formatting metadata attached to a node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decorations {
    /// Line break hint before the node (or before its first leading comment)
    pub before: Spacing,

    /// Comments on their own lines directly before the node
    pub leading: Vec<String>,

    /// Comment on the same line, after the node and its separator
    pub trailing: Option<String>,

    /// Comments on their own lines after the node, before a closing delimiter
    pub dangling: Vec<String>,

    /// Comments inside a container that has no children
    pub inner: Vec<String>,
}

/// A node of the syntax tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub origin: Origin,
    pub children: Vec<SyntaxNode>,
    pub decorations: Decorations,
}

impl Default for SyntaxNode {
    fn default() -> Self {
        SyntaxNode::synthesized(NodeKind::Unset, Vec::new())
    }
}

impl SyntaxNode {
    /// A node built by the rewriter
    pub fn synthesized(kind: NodeKind, children: Vec<SyntaxNode>) -> Self {
        Self {
            kind,
            origin: Origin::Synthesized { replaces: None },
            children,
            decorations: Decorations::default(),
        }
    }

    pub fn ident(name: &str) -> Self {
        Self::synthesized(NodeKind::Identifier(name.to_string()), Vec::new())
    }

    /// `operand.member` with both parts plain identifiers
    pub fn qualified(operand: &str, member: &str) -> Self {
        Self::synthesized(
            NodeKind::SelectorExpression,
            vec![Self::ident(operand), Self::ident(member)],
        )
    }

    pub fn key_value(key: &str, value: SyntaxNode) -> Self {
        Self::synthesized(NodeKind::KeyValueField, vec![Self::ident(key), value])
    }

    pub fn with_before(mut self, before: Spacing) -> Self {
        self.decorations.before = before;
        self
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self.origin, Origin::Parsed { .. })
    }

    /// Byte range of the slot this node occupies in the original source
    pub fn slot_range(&self) -> Option<Range<usize>> {
        match &self.origin {
            Origin::Parsed { range, .. } => Some(range.clone()),
            Origin::Synthesized { replaces } => replaces.clone(),
        }
    }

    /// Source location, if the node was parsed
    pub fn span(&self) -> Option<Span> {
        match &self.origin {
            Origin::Parsed { span, .. } => Some(*span),
            Origin::Synthesized { .. } => None,
        }
    }

    /// Name of an identifier node
    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Last child of the given kind
    pub fn last_child_of(&self, kind: &NodeKind) -> Option<&SyntaxNode> {
        self.children.iter().rev().find(|c| &c.kind == kind)
    }
}

/// A parsed file: its text and the tree built over it
#[derive(Debug, Clone)]
pub struct SourceTree {
    pub source: String,
    pub root: SyntaxNode,
}
