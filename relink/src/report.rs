// relink/src/report.rs
//! The result of an `apply` or `check` run, as printed by the summary view
//! and serialized by `--json`.

use serde::Serialize;
use std::path::PathBuf;

use relink_core::{merge_summaries, summarize, RewriteMatch, RewriteSummaryItem};

/// What happened to a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
    pub path: PathBuf,
    pub rewrites: usize,
    /// Whether the new contents were written back.
    pub written: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub target: String,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub changed_files: Vec<FileChange>,
    pub summary: Vec<RewriteSummaryItem>,
    pub commit_msg: String,
    pub create_pr: bool,
}

impl RunReport {
    pub fn new(target: String, commit_msg: String, create_pr: bool) -> Self {
        Self {
            target,
            commit_msg,
            create_pr,
            ..Self::default()
        }
    }

    /// Records the matches of one file.
    pub fn record(&mut self, path: PathBuf, matches: &[RewriteMatch], changed: bool, written: bool) {
        self.files_scanned += 1;
        let file_summary = summarize(matches);
        if changed {
            let rewrites = file_summary.iter().map(|s| s.occurrences).sum();
            self.changed_files.push(FileChange { path, rewrites, written });
        }
        merge_summaries(&mut self.summary, file_summary);
    }

    pub fn total_rewrites(&self) -> usize {
        self.summary.iter().map(|s| s.occurrences).sum()
    }
}
