// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # regshift: structural Go call-site migration
//!
//! Rewrites lint registration calls in a Go source tree from
//!
//! ```go
//! lint.RegisterLint(&lint.Lint{
//!     Name:        "e_example",
//!     Description: "...",
//!     Lint:        &example{},
//! })
//! ```
//!
//! to
//!
//! ```go
//! lint.RegisterCertificateLint(&lint.CertificateLint{
//!     LintMetadata: lint.LintMetadata{
//!         Name:        "e_example",
//!         Description: "...",
//!     },
//!     Lint: &example{},
//! })
//! ```
//!
//! leaving every other byte of the file as it was.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use regshift::{rewrite_source, RewriteConfig};
//!
//! let out = rewrite_source(&go_source, &RewriteConfig::default())?;
//! if out.rewrites > 0 {
//!     std::fs::write(path, out.text)?;
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                             │
//! │  Go source                                                  │
//! │       │                                                     │
//! │       ├──► parse_go ──► SourceTree (nodes + decorations)    │
//! │       │                                                     │
//! │       ├──► rewrite_tree ──► Matcher ─► redistribute         │
//! │       │                        └─────► Rewriter             │
//! │       │                                                     │
//! │       └──► print_tree ──► Go source                         │
//! │                                                             │
//! │  Directory                                                  │
//! │       └──► run ──► discover_go_files ─► process_file        │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure policy
//!
//! A call that has the right member name but not the `&T{...}` argument
//! shape is left alone. Once the shape matched, any field that is not a plain
//! `Key: value` pair aborts the whole file, and the file is not written.

pub mod ast;
pub mod config;
pub mod error;
pub mod format;
pub mod parse;
pub mod project;
pub mod rewrite;
pub mod util;

// Re-exports
pub use ast::{Decorations, NodeKind, Origin, SourceTree, Spacing, Span, SyntaxNode};
pub use config::{ConfigOverrides, MissingPayload, RewriteConfig, RunOptions};
pub use error::{Error, Result};
pub use format::{print_node, print_tree};
pub use parse::{parse_go, to_sexp};
pub use project::{
    discover_go_files, process_file, run, source_hash, FileFailure, FileOutcome, RunReport,
};
pub use rewrite::{
    redistribute, rewrite_source, rewrite_tree, Classification, Matcher, Redistribution,
    RewriteOutcome, Rewriter, SkipReason,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
