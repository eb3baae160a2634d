// relink/src/commands/mod.rs
//! Subcommand implementations.

use anyhow::Result;
use thiserror::Error;

use relink_core::{RelinkError, TargetIdentity};

pub mod apply;
pub mod rewrite;

/// Failures that only make sense at the command-line layer.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0} file(s) would be changed")]
    ChangesDetected(usize),

    #[error("{0} file(s) could not be processed")]
    FilesFailed(usize),
}

/// Resolves the target from `--repo` (or `GITHUB_REPOSITORY`, via clap).
pub fn resolve_target(repo: Option<&str>) -> Result<TargetIdentity> {
    match repo {
        Some(slug) => Ok(TargetIdentity::from_slug(slug)?),
        None => Err(RelinkError::MissingIdentity.into()),
    }
}
