//! Project discovery and batch rewriting
//!
//! Finds Go files under a directory and runs the rewrite over each one. Every
//! file is read once, rewritten fully in memory, and written back only when
//! the whole rewrite succeeded and actually changed something.

use crate::config::{RewriteConfig, RunOptions};
use crate::error::{Error, Result};
use crate::parse::is_go_file;
use crate::rewrite::rewrite_source;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: PathBuf,

    /// Number of calls rewritten
    pub rewrites: usize,

    /// Whether the output differs from the input
    pub changed: bool,

    /// Hash of the original source for change detection
    pub source_hash: String,
}

/// A file that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Summary of a batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub files_scanned: usize,
    pub files_changed: usize,
    pub total_rewrites: usize,
    pub dry_run: bool,
    pub outcomes: Vec<FileOutcome>,
    pub failures: Vec<FileFailure>,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human readable summary
    pub fn to_report(&self) -> String {
        let mut out = String::new();
        let verb = if self.dry_run { "would change" } else { "changed" };
        for outcome in self.outcomes.iter().filter(|o| o.changed) {
            out.push_str(&format!(
                "✓ {} ({} call{})\n",
                outcome.path.display(),
                outcome.rewrites,
                if outcome.rewrites == 1 { "" } else { "s" }
            ));
        }
        for failure in &self.failures {
            out.push_str(&format!("✗ {}: {}\n", failure.path.display(), failure.error));
        }
        out.push_str(&format!(
            "{} file(s) scanned, {} {}, {} call(s) rewritten, {} failed",
            self.files_scanned,
            self.files_changed,
            verb,
            self.total_rewrites,
            self.failures.len()
        ));
        out
    }
}

/// Find all Go files under `root`, sorted by path
///
/// A `root` that is itself a Go file is returned on its own. Directories that
/// cannot be read below the root are skipped. Symlinked directories are not
/// followed.
pub fn discover_go_files(root: &Path) -> Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(root).map_err(|e| Error::from(e).in_file(root))?;
    if metadata.is_file() {
        return Ok(if is_go_file(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut files = Vec::new();
    let entries = std::fs::read_dir(root).map_err(|e| Error::from(e).in_file(root))?;
    discover_recursive(entries, &mut files)?;
    files.sort();
    Ok(files)
}

fn discover_recursive(entries: std::fs::ReadDir, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in entries {
        let entry = entry.map_err(Error::Io)?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(Error::Io)?;

        if file_type.is_dir() {
            match std::fs::read_dir(&path) {
                Ok(children) => discover_recursive(children, files)?,
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable directory"),
            }
        } else if is_go_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Rewrite a single file on disk
pub fn process_file(path: &Path, config: &RewriteConfig, options: RunOptions) -> Result<FileOutcome> {
    process_file_inner(path, config, options).map_err(|e| e.in_file(path))
}

fn process_file_inner(
    path: &Path,
    config: &RewriteConfig,
    options: RunOptions,
) -> Result<FileOutcome> {
    let bytes = std::fs::read(path)?;
    let source_hash = source_hash(&bytes);
    let source = String::from_utf8(bytes).map_err(|e| Error::Parse {
        span: Default::default(),
        message: format!("file is not valid UTF-8: {}", e.utf8_error()),
    })?;

    let outcome = rewrite_source(&source, config)?;
    let changed = outcome.changed(&source);

    if changed && !options.dry_run {
        std::fs::write(path, outcome.text.as_bytes())?;
        info!(path = %path.display(), rewrites = outcome.rewrites, "rewrote file");
    } else if changed {
        info!(path = %path.display(), rewrites = outcome.rewrites, "would rewrite file");
    } else {
        debug!(path = %path.display(), "no registration calls");
    }

    Ok(FileOutcome {
        path: path.to_path_buf(),
        rewrites: outcome.rewrites,
        changed,
        source_hash,
    })
}

/// Rewrite every Go file under `root`
///
/// Without `keep_going`, the first failing file aborts the run and its error
/// is returned. Files already processed keep their new contents.
pub fn run(root: &Path, config: &RewriteConfig, options: RunOptions) -> Result<RunReport> {
    config.validate()?;
    let files = discover_go_files(root)?;
    info!(root = %root.display(), files = files.len(), "scanning");

    let mut report = RunReport {
        dry_run: options.dry_run,
        ..Default::default()
    };

    for path in files {
        report.files_scanned += 1;
        match process_file(&path, config, options) {
            Ok(outcome) => {
                report.total_rewrites += outcome.rewrites;
                if outcome.changed {
                    report.files_changed += 1;
                }
                report.outcomes.push(outcome);
            }
            Err(e) if options.keep_going => {
                warn!(path = %path.display(), error = %e, "file left unchanged");
                report.failures.push(FileFailure {
                    path,
                    error: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

/// `sha256:` followed by the first 8 bytes of the digest in hex
pub fn source_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
}
