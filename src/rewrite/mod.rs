//! Registration call rewriting
//!
//! Walks a parsed file once, pre-order, and replaces every registration call
//! in place:
//!
//! ```text
//! source ──► parse_go ──► SourceTree ──► Traversal ──► print_tree ──► source
//!                                         │
//!                                         ├── Matcher::classify
//!                                         └── Rewriter::rewrite
//!                                               └── redistribute
//! ```
//!
//! The traversal visits a parent's children by index. A candidate is taken
//! out of its slot, rewritten, and the replacement is put back at the same
//! index; the replacement is never descended into. Every other node is
//! descended into, so calls nested anywhere in the file are still found. The
//! first error stops the walk and the file is abandoned.

mod build;
mod matcher;
mod redistribute;

pub use build::Rewriter;
pub use matcher::{take_field_set, Classification, Matcher, SkipReason};
pub use redistribute::{redistribute, Redistribution};

use crate::ast::{SourceTree, SyntaxNode};
use crate::config::RewriteConfig;
use crate::error::Result;
use crate::format::print_tree;
use crate::parse::parse_go;
use tracing::{debug, trace};

/// Result of rewriting one file's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Full text of the file after rewriting
    pub text: String,

    /// Number of calls replaced
    pub rewrites: usize,
}

impl RewriteOutcome {
    pub fn changed(&self, original: &str) -> bool {
        self.rewrites > 0 && self.text != original
    }
}

/// Parse, rewrite and print one Go source file
///
/// Nothing is returned unless the whole file succeeded, so a caller that only
/// writes `Ok` output never writes a half-transformed file.
pub fn rewrite_source(source: &str, config: &RewriteConfig) -> Result<RewriteOutcome> {
    config.validate()?;
    let mut tree = parse_go(source)?;
    let rewrites = rewrite_tree(&mut tree, config)?;
    let text = if rewrites == 0 {
        source.to_string()
    } else {
        print_tree(&tree)?
    };
    Ok(RewriteOutcome { text, rewrites })
}

/// Rewrite every registration call in `tree`, returning how many were replaced
pub fn rewrite_tree(tree: &mut SourceTree, config: &RewriteConfig) -> Result<usize> {
    let mut traversal = Traversal {
        matcher: Matcher::new(config),
        rewriter: Rewriter::new(config),
        rewrites: 0,
    };
    traversal.walk(&mut tree.root)?;
    Ok(traversal.rewrites)
}

struct Traversal<'c> {
    matcher: Matcher<'c>,
    rewriter: Rewriter<'c>,
    rewrites: usize,
}

impl Traversal<'_> {
    fn walk(&mut self, parent: &mut SyntaxNode) -> Result<()> {
        for index in 0..parent.children.len() {
            match self.matcher.classify(&parent.children[index]) {
                Classification::TargetCandidate => {
                    let original = std::mem::take(&mut parent.children[index]);
                    let span = original.span().unwrap_or_default();
                    parent.children[index] = self.rewriter.rewrite(original)?;
                    self.rewrites += 1;
                    debug!(at = %span, "rewrote registration call");
                }
                Classification::CallButNotTarget(reason) => {
                    if let SkipReason::ArgumentShape(_) = reason {
                        debug!(
                            at = %parent.children[index].span().unwrap_or_default(),
                            %reason,
                            "left matching call untouched"
                        );
                    } else {
                        trace!(%reason, "skipped call");
                    }
                    self.walk(&mut parent.children[index])?;
                }
                Classification::NotACall => self.walk(&mut parent.children[index])?,
            }
        }
        Ok(())
    }
}
