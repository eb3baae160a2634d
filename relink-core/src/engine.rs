// relink-core/src/engine.rs
//! Defines the core RewriteEngine trait and the options shared by engines.
//!
//! The `RewriteEngine` trait decouples the orchestration layer (file
//! discovery, reporting) from the specific rewriting method. An engine is a
//! pure function of its construction-time options and the text it is given:
//! it performs no I/O and never fails, so a single instance can be shared
//! across threads and applied to many text bodies concurrently.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};

use crate::identity::TargetIdentity;
use crate::patterns::UrlCategory;
use crate::rewrite_match::RewriteMatch;

/// A pluggable text rewriter.
pub trait RewriteEngine: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Rewrites `content` and reports every occurrence examined, including
    /// the ones that were left unchanged.
    ///
    /// # Arguments
    /// * `content` - The text body to rewrite.
    /// * `source_id` - An identifier for the text (e.g. a file path), copied
    ///   into each reported match.
    fn rewrite(&self, content: &str, source_id: &str) -> (String, Vec<RewriteMatch>);

    /// Reports what `rewrite` would do without handing back the new text.
    fn find_rewrites(&self, content: &str, source_id: &str) -> Vec<RewriteMatch> {
        self.rewrite(content, source_id).1
    }
}

/// Inputs of the GitHub URL engine: which categories to apply (in order),
/// which occurrences to leave alone, and where URLs should point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    pub categories: Vec<UrlCategory>,
    #[serde(default)]
    pub ignore: Vec<String>,
    pub target: TargetIdentity,
}

impl EngineOptions {
    pub fn new(categories: Vec<UrlCategory>, ignore: Vec<String>, target: TargetIdentity) -> Self {
        Self {
            categories,
            ignore,
            target,
        }
    }
}
