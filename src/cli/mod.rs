//! CLI command implementations
//!
//! - `rewrite`: the batch rewrite command
//! - `inspect`: debugging commands (sexp, config)
//! - `util`: shared argument types and logging setup

pub mod inspect;
pub mod rewrite;
pub mod util;

pub use inspect::{cmd_config, cmd_sexp};
pub use rewrite::{cmd_rewrite, RewriteArgs};
pub use util::{init_tracing, NameArgs};
