//! Printer
//!
//! Serializes a [`SourceTree`] back to Go source text.
//!
//! - Parsed nodes at their original place print their own source range, with
//!   each child's range swapped for that child's printout. An untouched tree
//!   therefore prints back to exactly the text it was parsed from.
//! - Synthesized nodes get a gofmt-like layout: tab indentation, one element
//!   per line in braced lists, aligned keys.
//! - Parsed nodes moved under a synthesized parent print verbatim, shifted
//!   from their old line indentation to the new one.

use crate::ast::{NodeKind, Origin, SourceTree, Spacing, SyntaxNode};
use crate::error::{Error, Result};
use crate::util::{last_line_indent, line_indent, reindent};
use std::ops::Range;

/// Print a whole tree
pub fn print_tree(tree: &SourceTree) -> Result<String> {
    let printer = Printer::new(&tree.source);
    let mut out = String::with_capacity(tree.source.len());
    printer.emit(&tree.root, &Shift::none(), &mut out)?;
    Ok(out)
}

/// Print a single node as it would appear at indentation `indent`
pub fn print_node(source: &str, node: &SyntaxNode, indent: &str) -> Result<String> {
    Printer::new(source).render(node, indent)
}

/// Indentation change applied to every line break of relocated text
#[derive(Debug, Clone)]
struct Shift {
    from: String,
    to: String,
}

impl Shift {
    fn none() -> Self {
        Self {
            from: String::new(),
            to: String::new(),
        }
    }

    fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    fn apply(&self, text: &str) -> String {
        reindent(text, &self.from, &self.to)
    }

    fn indent(&self, original: &str) -> String {
        match original.strip_prefix(self.from.as_str()) {
            Some(rest) => format!("{}{}", self.to, rest),
            None => original.to_string(),
        }
    }
}

/// One element of a braced list, rendered but not yet placed
struct Entry<'n> {
    node: &'n SyntaxNode,
    key: Option<String>,
    body: String,
}

impl Entry<'_> {
    fn alignable(&self) -> bool {
        self.key.is_some() && !self.body.contains('\n')
    }
}

struct Printer<'s> {
    source: &'s str,
    /// Line ending used for synthesized lines, taken from the source
    newline: &'static str,
}

impl<'s> Printer<'s> {
    fn new(source: &'s str) -> Self {
        let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };
        Self { source, newline }
    }

    /// Print `node` into `out`, which holds everything printed before it
    fn emit(&self, node: &SyntaxNode, shift: &Shift, out: &mut String) -> Result<()> {
        match &node.origin {
            Origin::Parsed { range, .. } => self.emit_parsed(node, range.clone(), shift, out),
            Origin::Synthesized { replaces } => {
                let indent = match replaces {
                    Some(slot) => shift.indent(line_indent(self.source, slot.start)),
                    None => last_line_indent(out).to_string(),
                };
                let text = self.render(node, &indent)?;
                out.push_str(&text);
                Ok(())
            }
        }
    }

    fn emit_parsed(
        &self,
        node: &SyntaxNode,
        range: Range<usize>,
        shift: &Shift,
        out: &mut String,
    ) -> Result<()> {
        let text = self.slice(range.clone())?;
        if node.children.is_empty() {
            match &node.kind {
                NodeKind::Other(kind) if kind == "raw_string_literal" => out.push_str(text),
                _ => out.push_str(&shift.apply(text)),
            }
            return Ok(());
        }

        let mut cursor = range.start;
        for child in &node.children {
            let slot = child.slot_range().ok_or_else(|| {
                Error::Print(format!(
                    "synthesized {} has no slot inside a parsed {}",
                    child.kind.describe(),
                    node.kind.describe()
                ))
            })?;
            if slot.start < cursor || slot.end > range.end {
                return Err(Error::Print(format!(
                    "{} at bytes {}..{} lies outside its parent",
                    child.kind.describe(),
                    slot.start,
                    slot.end
                )));
            }
            out.push_str(&shift.apply(self.slice(cursor..slot.start)?));
            self.emit(child, shift, out)?;
            cursor = slot.end;
        }
        out.push_str(&shift.apply(self.slice(cursor..range.end)?));
        Ok(())
    }

    fn slice(&self, range: Range<usize>) -> Result<&'s str> {
        self.source
            .get(range.clone())
            .ok_or_else(|| Error::Print(format!("byte range {:?} is not in the source", range)))
    }

    /// Render a node on its own, as if it started on a line indented by `indent`
    fn render(&self, node: &SyntaxNode, indent: &str) -> Result<String> {
        if let Origin::Parsed { range, .. } = &node.origin {
            let shift = Shift::new(line_indent(self.source, range.start), indent);
            let mut out = String::new();
            self.emit_parsed(node, range.clone(), &shift, &mut out)?;
            return Ok(out);
        }

        let malformed = || {
            Error::Print(format!(
                "malformed synthesized {} with {} children",
                node.kind.describe(),
                node.children.len()
            ))
        };

        match (&node.kind, node.children.as_slice()) {
            (NodeKind::Identifier(name), []) => Ok(name.clone()),
            (NodeKind::Unset, []) => Ok("nil".to_string()),
            (NodeKind::SelectorExpression, [operand, member]) => Ok(format!(
                "{}.{}",
                self.render(operand, indent)?,
                self.render(member, indent)?
            )),
            (NodeKind::CallExpression, [callee, args]) => Ok(format!(
                "{}{}",
                self.render(callee, indent)?,
                self.render(args, indent)?
            )),
            (NodeKind::ArgumentList, args) => {
                let args = args
                    .iter()
                    .map(|a| self.render(a, indent))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("({})", args.join(", ")))
            }
            (NodeKind::UnaryExpression(op), [operand]) => {
                Ok(format!("{}{}", op, self.render(operand, indent)?))
            }
            (NodeKind::CompositeValue, [ty, body]) => Ok(format!(
                "{}{}",
                self.render(ty, indent)?,
                self.render(body, indent)?
            )),
            (NodeKind::LiteralValue, _) => self.render_list(node, indent),
            (NodeKind::KeyValueField, [key, value]) => Ok(format!(
                "{}: {}",
                self.render(key, indent)?,
                self.render(value, indent)?
            )),
            (NodeKind::SourceFile | NodeKind::Other(_), _) => Err(Error::Print(format!(
                "cannot lay out synthesized {} node",
                node.kind.describe()
            ))),
            _ => Err(malformed()),
        }
    }

    /// Key and value of a field that can be re-laid out as `key: value`
    fn key_value<'n>(&self, node: &'n SyntaxNode) -> Option<(&'n SyntaxNode, &'n SyntaxNode)> {
        let [key, value] = node.children.as_slice() else {
            return None;
        };
        if node.kind != NodeKind::KeyValueField {
            return None;
        }
        match (key.slot_range(), value.slot_range(), node.is_parsed()) {
            // Anything but the colon between key and value (a comment) keeps it verbatim
            (Some(k), Some(v), true) => {
                let gap = self.source.get(k.end..v.start)?;
                (gap.trim() == ":").then_some((key, value))
            }
            _ => Some((key, value)),
        }
    }

    fn render_list(&self, node: &SyntaxNode, indent: &str) -> Result<String> {
        let inner = format!("{}\t", indent);

        if node.children.is_empty() {
            if node.decorations.inner.is_empty() {
                return Ok("{}".to_string());
            }
            let mut out = format!("{{{}", self.newline);
            for comment in &node.decorations.inner {
                out.push_str(&inner);
                out.push_str(comment);
                out.push_str(self.newline);
            }
            out.push_str(indent);
            out.push('}');
            return Ok(out);
        }

        let mut entries = Vec::with_capacity(node.children.len());
        for child in &node.children {
            let entry = match self.key_value(child) {
                Some((key, value)) => Entry {
                    node: child,
                    key: Some(self.render(key, &inner)?),
                    body: self.render(value, &inner)?,
                },
                None => Entry {
                    node: child,
                    key: None,
                    body: self.render(child, &inner)?,
                },
            };
            entries.push(entry);
        }

        let widths = key_widths(&entries);

        let mut out = String::from("{");
        for (i, (entry, width)) in entries.iter().zip(widths).enumerate() {
            let decorations = &entry.node.decorations;
            out.push_str(self.newline);
            if i > 0 && decorations.before == Spacing::EmptyLine {
                out.push_str(self.newline);
            }
            for comment in &decorations.leading {
                out.push_str(&inner);
                out.push_str(comment);
                out.push_str(self.newline);
            }
            out.push_str(&inner);
            if let Some(key) = &entry.key {
                out.push_str(key);
                out.push(':');
                let pad = width.saturating_sub(key.chars().count());
                out.extend(std::iter::repeat_n(' ', pad + 1));
            }
            out.push_str(&entry.body);
            out.push(',');
            if let Some(comment) = &decorations.trailing {
                out.push(' ');
                out.push_str(comment);
            }
            for comment in &decorations.dangling {
                out.push_str(self.newline);
                out.push_str(&inner);
                out.push_str(comment);
            }
        }
        out.push_str(self.newline);
        out.push_str(indent);
        out.push('}');
        Ok(out)
    }
}

/// Column width for each entry's key
///
/// Consecutive single-line keyed entries share the width of their longest
/// key. A blank line or a multi-line entry starts a new section.
fn key_widths(entries: &[Entry<'_>]) -> Vec<usize> {
    let mut widths = vec![0; entries.len()];
    let mut start = 0;
    while start < entries.len() {
        if !entries[start].alignable() {
            widths[start] = entries[start].key.as_ref().map_or(0, |k| k.chars().count());
            start += 1;
            continue;
        }
        let mut end = start + 1;
        while end < entries.len()
            && entries[end].alignable()
            && entries[end].node.decorations.before != Spacing::EmptyLine
        {
            end += 1;
        }
        let width = entries[start..end]
            .iter()
            .filter_map(|e| e.key.as_ref())
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0);
        widths[start..end].fill(width);
        start = end;
    }
    widths
}
