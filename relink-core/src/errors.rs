//! errors.rs - Custom error types for the relink-core library.
//!
//! The rewrite engines themselves never fail: ambiguous or malformed URLs are
//! passed through untouched. Everything that can go wrong lives in the layers
//! around them (configuration loading, identity resolution), and is reported
//! through [`RelinkError`].
//!
//! License: MIT OR APACHE 2.0

use std::path::PathBuf;
use thiserror::Error;

/// All error types produced by the `relink-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RelinkError {
    #[error("Configuration file not found at {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yml::Error),

    #[error("Configuration is empty or invalid")]
    EmptyConfig,

    #[error("{0}")]
    InvalidConfig(String),

    #[error("Invalid GitHub URL types: {}. Valid types are: {}", .invalid.join(", "), .valid.join(", "))]
    InvalidCategories {
        invalid: Vec<String>,
        valid: Vec<&'static str>,
    },

    #[error("Invalid URL category '{0}'")]
    UnknownCategory(String),

    #[error("Invalid target repository '{0}': expected OWNER/REPO")]
    InvalidIdentity(String),

    #[error("Target repository is not set: pass --repo or set GITHUB_REPOSITORY")]
    MissingIdentity,

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RelinkError>;
