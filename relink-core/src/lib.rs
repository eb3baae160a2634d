// relink-core/src/lib.rs
//! # relink Core Library
//!
//! `relink-core` finds GitHub URLs embedded in arbitrary text (source files,
//! docs) and normalizes the ones that refer to a username, a repository or a
//! sponsors page so they point at a target owner/repository. URLs that are
//! ignored, contain unresolved `${...}` templates, already point at the
//! target, or cannot be classified are left exactly as they were.
//!
//! The library is pure: engines take text and return text, with no I/O and
//! no shared mutable state. Configuration loading is the only part that
//! touches the file system.
//!
//! ## Modules
//!
//! * `patterns`: The URL category tags, their regular expressions and the classifier.
//! * `engine`: The `RewriteEngine` trait and `EngineOptions`.
//! * `engines`: `GithubUrlEngine` (classify-and-rewrite) and `LinkEngine` (literal replacements).
//! * `config`: YAML configuration loading, defaulting, validation and template resolution.
//! * `identity`: The target owner/repository.
//! * `rewrite_match`: Per-occurrence records and summaries.
//! * `headless`: One-shot helpers combining the engines.
//! * `errors`: The library error type.
//!
//! ## Usage Example
//!
//! ```rust
//! use relink_core::{rewrite_github_urls, TargetIdentity, UrlCategory};
//!
//! let target = TargetIdentity::new("bob", "bar");
//! let text = "Clone https://github.com/alice/foo.git or sponsor https://github.com/sponsors/alice";
//! let out = rewrite_github_urls(text, &[UrlCategory::All], &[], &target);
//! assert_eq!(out, "Clone https://github.com/bob/bar.git or sponsor https://github.com/sponsors/bob");
//! ```
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod identity;
pub mod patterns;
pub mod rewrite_match;

pub use config::{
    parse_categories, process_template, resolve_config_path, GithubUrlsConfig, LinkRule, UpdateConfig,
    DEFAULT_COMMIT_MSG, DEFAULT_CONFIG_PATH,
};

pub use errors::RelinkError;

pub use engine::{EngineOptions, RewriteEngine};

pub use engines::github_url_engine::{rewrite_github_urls, GithubUrlEngine};
pub use engines::link_engine::LinkEngine;

pub use identity::TargetIdentity;

pub use patterns::{classify, is_template_placeholder, UrlCategory};

pub use rewrite_match::{merge_summaries, summarize, MatchOutcome, RewriteMatch, RewriteSummaryItem};

pub use headless::{rewrite_document, DocumentRewriter};
