//! Replacement call construction

use super::matcher::take_field_set;
use super::redistribute::{redistribute, Redistribution};
use crate::ast::{NodeKind, Origin, Spacing, SyntaxNode};
use crate::config::{MissingPayload, RewriteConfig};
use crate::error::{Error, Result};

pub struct Rewriter<'c> {
    config: &'c RewriteConfig,
}

impl<'c> Rewriter<'c> {
    pub fn new(config: &'c RewriteConfig) -> Self {
        Self { config }
    }

    /// Turn a matched registration call into
    /// `ns.RegisterFn(&ns.Result{MetaKey: ns.Meta{...}, PayloadKey: value})`
    ///
    /// The returned node takes over the original call's slot.
    pub fn rewrite(&self, call: SyntaxNode) -> Result<SyntaxNode> {
        let replaces = call.slot_range();
        let span = call.span().unwrap_or_default();
        let decorations = call.decorations.clone();

        let mut stray = Vec::new();
        for child in &call.children {
            collect_outside_fields(child, &mut stray);
        }

        let body = take_field_set(call).ok_or_else(|| {
            Error::Other(format!("registration call at {} lost its field list", span))
        })?;
        let inner_comments = body.decorations.inner;
        let Redistribution { metadata, payload } =
            redistribute(body.children, &self.config.payload_key)?;

        let ns = &self.config.namespace;

        let payload = match (payload, self.config.missing_payload) {
            (Some(field), _) => field,
            (None, MissingPayload::EmitNil) => {
                SyntaxNode::key_value(&self.config.payload_key, SyntaxNode::default())
            }
            (None, MissingPayload::Error) => {
                return Err(Error::MissingPayload {
                    span,
                    key: self.config.payload_key.clone(),
                })
            }
        };

        let metadata = metadata
            .into_iter()
            .map(|field| {
                let before = match field.decorations.before {
                    Spacing::EmptyLine => Spacing::EmptyLine,
                    _ => Spacing::NewLine,
                };
                field.with_before(before)
            })
            .collect();
        let mut metadata_body = SyntaxNode::synthesized(NodeKind::LiteralValue, metadata);
        metadata_body.decorations.inner = inner_comments;

        let metadata_value = SyntaxNode::synthesized(
            NodeKind::CompositeValue,
            vec![
                SyntaxNode::qualified(ns, &self.config.metadata_type),
                metadata_body,
            ],
        );

        let mut metadata_field = SyntaxNode::key_value(&self.config.metadata_key, metadata_value)
            .with_before(Spacing::NewLine);
        metadata_field.decorations.leading = stray;

        let fields = vec![
            metadata_field,
            payload.with_before(Spacing::NewLine),
        ];
        let result = SyntaxNode::synthesized(
            NodeKind::CompositeValue,
            vec![
                SyntaxNode::qualified(ns, &self.config.result_type),
                SyntaxNode::synthesized(NodeKind::LiteralValue, fields),
            ],
        );

        let argument = SyntaxNode::synthesized(NodeKind::UnaryExpression("&".into()), vec![result]);

        let mut replacement = SyntaxNode::synthesized(
            NodeKind::CallExpression,
            vec![
                SyntaxNode::qualified(ns, &self.config.register_function),
                SyntaxNode::synthesized(NodeKind::ArgumentList, vec![argument]),
            ],
        );
        replacement.origin = Origin::Synthesized { replaces };
        replacement.decorations = decorations;
        Ok(replacement)
    }
}

/// Comments in the call that are not inside the field list
///
/// They are re-emitted above the metadata field, in source order.
fn collect_outside_fields(node: &SyntaxNode, out: &mut Vec<String>) {
    let decorations = &node.decorations;
    out.extend(decorations.leading.iter().cloned());
    if node.kind != NodeKind::LiteralValue {
        out.extend(decorations.inner.iter().cloned());
        for child in &node.children {
            collect_outside_fields(child, out);
        }
    }
    out.extend(decorations.trailing.iter().cloned());
    out.extend(decorations.dangling.iter().cloned());
}
