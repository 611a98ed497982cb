//! The rewrite command

use super::util::NameArgs;
use clap::Args;
use regshift::*;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RewriteArgs {
    /// Directory (or single .go file) to rewrite
    pub path: PathBuf,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Keep processing other files after one fails
    #[arg(long)]
    pub keep_going: bool,

    /// JSON output format
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub names: NameArgs,
}

pub fn cmd_rewrite(args: &RewriteArgs) -> Result<()> {
    let config = args.names.to_config();
    let options = RunOptions {
        dry_run: args.dry_run,
        keep_going: args.keep_going,
    };

    let report = run(&args.path, &config, options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.to_report());
    }

    if report.passed() {
        Ok(())
    } else {
        Err(format!("{} file(s) failed", report.failures.len()).into())
    }
}
