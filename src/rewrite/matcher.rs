//! Registration call matcher
//!
//! Purely structural: looks at node kinds and names, never at types.

use crate::ast::{NodeKind, SyntaxNode};
use crate::config::RewriteConfig;
use std::fmt;

/// What the matcher thinks of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    NotACall,
    CallButNotTarget(SkipReason),
    TargetCandidate,
}

/// Why a call was not a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `f(x)` rather than `pkg.f(x)`
    CalleeNotSelector,
    /// Selector with a different member name
    OtherMember(String),
    /// Right name, but the argument is not `&T{...}`
    ArgumentShape(&'static str),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::CalleeNotSelector => write!(f, "callee is not a selector"),
            SkipReason::OtherMember(name) => write!(f, "member is {}", name),
            SkipReason::ArgumentShape(why) => write!(f, "argument shape: {}", why),
        }
    }
}

pub struct Matcher<'c> {
    target_selector: &'c str,
}

impl<'c> Matcher<'c> {
    pub fn new(config: &'c RewriteConfig) -> Self {
        Self {
            target_selector: &config.target_selector,
        }
    }

    pub fn classify(&self, node: &SyntaxNode) -> Classification {
        if node.kind != NodeKind::CallExpression {
            return Classification::NotACall;
        }

        let Some(callee) = node.children.first() else {
            return Classification::CallButNotTarget(SkipReason::CalleeNotSelector);
        };
        if callee.kind != NodeKind::SelectorExpression {
            return Classification::CallButNotTarget(SkipReason::CalleeNotSelector);
        }

        let member = callee.children.last().and_then(SyntaxNode::identifier);
        match member {
            Some(name) if name == self.target_selector => {}
            other => {
                return Classification::CallButNotTarget(SkipReason::OtherMember(
                    other.unwrap_or_default().to_string(),
                ))
            }
        }

        match check_argument(node) {
            Ok(()) => Classification::TargetCandidate,
            Err(why) => Classification::CallButNotTarget(SkipReason::ArgumentShape(why)),
        }
    }
}

/// `&T{...}` as the one and only argument
fn check_argument(call: &SyntaxNode) -> Result<(), &'static str> {
    let args = call
        .last_child_of(&NodeKind::ArgumentList)
        .ok_or("no argument list")?;
    let [argument] = args.children.as_slice() else {
        return Err("expected exactly one argument");
    };
    if argument.kind != NodeKind::UnaryExpression("&".to_string()) {
        return Err("argument is not an address-of expression");
    }
    let [operand] = argument.children.as_slice() else {
        return Err("address-of has no operand");
    };
    if operand.kind != NodeKind::CompositeValue {
        return Err("address-of operand is not a composite literal");
    }
    if operand.last_child_of(&NodeKind::LiteralValue).is_none() {
        return Err("composite literal has no body");
    }
    Ok(())
}

/// Take the braced field list out of a call the matcher accepted
pub fn take_field_set(call: SyntaxNode) -> Option<SyntaxNode> {
    let args = call
        .children
        .into_iter()
        .rev()
        .find(|c| c.kind == NodeKind::ArgumentList)?;
    let argument = args.children.into_iter().next()?;
    let composite = argument.children.into_iter().next()?;
    composite
        .children
        .into_iter()
        .rev()
        .find(|c| c.kind == NodeKind::LiteralValue)
}
