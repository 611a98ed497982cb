//! regshift CLI - Command-line interface
//!
//! Commands:
//!   rewrite  - Rewrite registration calls under a path
//!   sexp     - Dump the tree-sitter S-expression of a Go file
//!   config   - Print the effective rewrite configuration

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "regshift")]
#[command(about = "Migrate Go lint registration calls to the certificate lint shape")]
#[command(version)]
struct Cli {
    /// Log every skipped and rewritten call
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite registration calls in every .go file under PATH
    Rewrite(cli::RewriteArgs),

    /// Print the tree-sitter S-expression of a Go file
    Sexp {
        /// Go source file
        file: PathBuf,
    },

    /// Print the effective configuration as YAML
    Config(cli::NameArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Rewrite(args) => cli::cmd_rewrite(&args),
        Command::Sexp { file } => cli::cmd_sexp(&file),
        Command::Config(names) => cli::cmd_config(&names),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
