// relink/src/commands/apply.rs
//! `relink apply` and `relink check`.
//!
//! Both load the configuration, discover the selected files and run the
//! rewrite pipeline over each of them on the blocking pool. `apply` writes
//! changed files back; `check` only reports.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, error, info, warn};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

use relink_core::{DocumentRewriter, RewriteMatch, TargetIdentity, UpdateConfig};

use crate::cli::RunArgs;
use crate::commands::CliError;
use crate::report::RunReport;
use crate::ui::{diff_viewer, summary};
use crate::utils::walker::discover_files;

/// The outcome of processing one file on the blocking pool.
enum FileResult {
    Processed {
        path: PathBuf,
        original: String,
        rewritten: String,
        matches: Vec<RewriteMatch>,
        written: bool,
    },
    Skipped(PathBuf),
}

impl FileResult {
    fn path(&self) -> &PathBuf {
        match self {
            FileResult::Processed { path, .. } | FileResult::Skipped(path) => path,
        }
    }
}

/// Runs the pipeline over every configured file.
///
/// With `write` set, changed files are written back. The report is always
/// printed first; afterwards a file that failed to read or write yields
/// [`CliError::FilesFailed`], and with `fail_on_change` any change yields
/// [`CliError::ChangesDetected`].
pub async fn run_apply(
    args: &RunArgs,
    target: TargetIdentity,
    write: bool,
    fail_on_change: bool,
    quiet: bool,
) -> Result<RunReport> {
    info!("Starting relink for target '{}'.", target);
    let config = UpdateConfig::load_from_file(args.config.as_deref(), &target)?;
    let files = discover_files(&config)?;
    info!("{} file(s) selected.", files.len());

    let rewriter = Arc::new(DocumentRewriter::new(&config, &target));
    let (results, failures) = process_files(rewriter, files, write).await?;

    let mut report = RunReport::new(target.to_string(), config.commit_msg.clone(), config.create_pr);
    report.files_failed = failures.len();
    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut out = stdout.lock();

    for result in results {
        match result {
            FileResult::Skipped(_) => report.files_skipped += 1,
            FileResult::Processed {
                path,
                original,
                rewritten,
                matches,
                written,
            } => {
                let changed = original != rewritten;
                if changed && args.diff && !args.json {
                    diff_viewer::print_diff(&original, &rewritten, &path.to_string_lossy(), &mut out, color)?;
                }
                report.record(path, &matches, changed, written);
            }
        }
    }

    if args.json {
        summary::print_json(&report, &mut out)?;
    } else if !quiet {
        summary::print_summary(&report, &mut out, color)?;
    }
    out.flush()?;

    let changed = report.changed_files.len();
    if write && changed > 0 {
        info!("Commit message for this change: {}", report.commit_msg);
        if report.create_pr {
            info!("createPr is set; open a pull request with the written changes.");
        }
    }
    if !failures.is_empty() {
        return Err(CliError::FilesFailed(failures.len()).into());
    }
    if fail_on_change && changed > 0 {
        return Err(CliError::ChangesDetected(changed).into());
    }
    Ok(report)
}

/// Runs every file on the blocking pool and returns the results in path
/// order. A file that cannot be read or written is logged and returned as a
/// failure; the other files are still processed.
async fn process_files(
    rewriter: Arc<DocumentRewriter>,
    files: Vec<PathBuf>,
    write: bool,
) -> Result<(Vec<FileResult>, Vec<(PathBuf, anyhow::Error)>)> {
    let mut tasks = JoinSet::new();
    for path in files {
        let rewriter = Arc::clone(&rewriter);
        tasks.spawn_blocking(move || {
            let outcome = process_file(&rewriter, path.clone(), write);
            (path, outcome)
        });
    }

    let mut results = Vec::new();
    let mut failures = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined.context("File worker panicked")? {
            (_, Ok(result)) => results.push(result),
            (path, Err(e)) => {
                error!("{:#}", e);
                failures.push((path, e));
            }
        }
    }
    results.sort_by(|a, b| a.path().cmp(b.path()));
    failures.sort_by(|a, b| a.0.cmp(&b.0));
    Ok((results, failures))
}

fn process_file(rewriter: &DocumentRewriter, path: PathBuf, write: bool) -> Result<FileResult> {
    let bytes = std::fs::read(&path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    let original = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => {
            warn!("Skipping '{}': not valid UTF-8.", path.display());
            return Ok(FileResult::Skipped(path));
        }
    };

    let source_id = path.to_string_lossy().into_owned();
    let (rewritten, matches) = rewriter.rewrite(&original, &source_id);

    let mut written = false;
    if write && rewritten != original {
        std::fs::write(&path, &rewritten).with_context(|| format!("Failed to write '{}'", path.display()))?;
        debug!("Updated '{}'.", path.display());
        written = true;
    }

    Ok(FileResult::Processed {
        path,
        original,
        rewritten,
        matches,
        written,
    })
}
