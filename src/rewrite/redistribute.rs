//! Field redistribution
//!
//! Splits the fields of a matched composite into the payload field and the
//! metadata fields.

use crate::ast::{NodeKind, SyntaxNode};
use crate::error::{Error, Result};

/// Fields of a matched call, sorted into the two output buckets
#[derive(Debug, Clone, Default)]
pub struct Redistribution {
    /// Every field except the payload key, in original order
    pub metadata: Vec<SyntaxNode>,

    /// The whole `key: value` field holding the payload, if the key was set
    pub payload: Option<SyntaxNode>,
}

/// Sort `fields` into metadata and payload
///
/// A payload key that appears more than once keeps its LAST value, the same
/// result as assigning the fields one after another. Earlier occurrences are
/// dropped.
///
/// Every element must be `Ident: value`. Anything else is an error, since
/// guessing what a positional or computed key meant could silently change the
/// program.
pub fn redistribute(fields: Vec<SyntaxNode>, payload_key: &str) -> Result<Redistribution> {
    let mut out = Redistribution::default();

    for field in fields {
        if field.kind != NodeKind::KeyValueField || field.children.len() != 2 {
            return Err(Error::FieldShape {
                span: field.span().unwrap_or_default(),
                message: format!("expected a key/value field, found {}", field.kind.describe()),
            });
        }

        let key = &field.children[0];
        let Some(name) = key.identifier() else {
            return Err(Error::FieldShape {
                span: key.span().unwrap_or_default(),
                message: format!(
                    "field key must be a plain identifier, found {}",
                    key.kind.describe()
                ),
            });
        };

        if name == payload_key {
            out.payload = Some(field);
        } else {
            out.metadata.push(field);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_go;

    fn fields_of(literal: &str) -> Vec<SyntaxNode> {
        fn find(node: &SyntaxNode) -> Option<&SyntaxNode> {
            if node.kind == NodeKind::LiteralValue {
                return Some(node);
            }
            node.children.iter().find_map(find)
        }
        let src = format!("package p\n\nvar v = &T{}\n", literal);
        let tree = parse_go(&src).unwrap();
        find(&tree.root).unwrap().children.clone()
    }

    fn key_names(fields: &[SyntaxNode]) -> Vec<&str> {
        fields
            .iter()
            .filter_map(|f| f.children[0].identifier())
            .collect()
    }

    #[test]
    fn test_payload_split_keeps_order() {
        let r = redistribute(fields_of("{A: 1, Lint: New, B: 2, C: 3}"), "Lint").unwrap();
        assert_eq!(key_names(&r.metadata), vec!["A", "B", "C"]);
        let payload = r.payload.unwrap();
        assert_eq!(payload.children[1].identifier(), Some("New"));
    }

    #[test]
    fn test_last_payload_wins() {
        let r = redistribute(fields_of("{Lint: first, A: 1, Lint: second}"), "Lint").unwrap();
        assert_eq!(key_names(&r.metadata), vec!["A"]);
        assert_eq!(r.payload.unwrap().children[1].identifier(), Some("second"));
    }

    #[test]
    fn test_missing_payload() {
        let r = redistribute(fields_of("{A: 1, B: 2}"), "Lint").unwrap();
        assert_eq!(r.metadata.len(), 2);
        assert!(r.payload.is_none());
    }

    #[test]
    fn test_positional_element_rejected() {
        let err = redistribute(fields_of("{A: 1, \"bare\"}"), "Lint").unwrap_err();
        match err {
            Error::FieldShape { span, message } => {
                assert_eq!(span.start_line, 3);
                assert!(message.contains("key/value"), "{message}");
            }
            other => panic!("Expected FieldShape, got {other:?}"),
        }
    }

    #[test]
    fn test_qualified_key_rejected() {
        let err = redistribute(fields_of("{pkg.Key: 1}"), "Lint").unwrap_err();
        match err {
            Error::FieldShape { message, .. } => assert!(message.contains("plain identifier")),
            other => panic!("Expected FieldShape, got {other:?}"),
        }
    }
}
