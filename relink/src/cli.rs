// relink/src/cli.rs
//! This file defines the command-line interface (CLI) for the relink application,
//! including all available commands and their arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use relink_core::UrlCategory;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "relink",
    version = env!("CARGO_PKG_VERSION"),
    about = "Point GitHub links at the right owner and repository",
    long_about = "relink finds GitHub profile, repository and sponsors URLs in your files and rewrites them so they point at a target owner/repository. URLs that are ignored, templated, already correct or ambiguous are left exactly as they are.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress all informational and debug messages.
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet")]
    pub debug: bool,

    /// Target repository the links should point at.
    #[arg(long = "repo", value_name = "OWNER/REPO", env = "GITHUB_REPOSITORY", global = true)]
    pub repo: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrites matching files in place according to the configuration file.
    Apply(RunArgs),

    /// Reports what `apply` would change without writing anything.
    Check(CheckArgs),

    /// Rewrites a single input (a file or stdin) and prints the result.
    Rewrite(RewriteArgs),
}

/// Arguments shared by `apply` and `check`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to the configuration file (defaults to .github/updatelinks.yml).
    #[arg(long = "config", short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show a unified diff for every changed file.
    #[arg(long, short = 'D')]
    pub diff: bool,

    /// Print the run report as JSON on stdout.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Exit with a non-zero code if any file would change.
    #[arg(long = "fail-on-change")]
    pub fail_on_change: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RewriteArgs {
    /// Read input from a file instead of stdin.
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// URL categories to apply, in order (comma-separated).
    #[arg(long, short = 't', value_enum, value_delimiter = ',', default_value = "all")]
    pub types: Vec<CategoryChoice>,

    /// Leave URLs containing any of these substrings untouched (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',')]
    pub ignore: Vec<String>,

    /// Print a unified diff instead of the rewritten text.
    #[arg(long, short = 'D')]
    pub diff: bool,
}

/// URL categories as accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum CategoryChoice {
    /// Profile root URLs such as https://github.com/alice
    Username,
    /// Repository URLs, with any sub-path
    Repo,
    /// Sponsors pages
    Sponsors,
    /// Every GitHub URL, classified one by one
    All,
}

impl From<CategoryChoice> for UrlCategory {
    fn from(choice: CategoryChoice) -> Self {
        match choice {
            CategoryChoice::Username => UrlCategory::Username,
            CategoryChoice::Repo => UrlCategory::Repo,
            CategoryChoice::Sponsors => UrlCategory::Sponsors,
            CategoryChoice::All => UrlCategory::All,
        }
    }
}
