// relink-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot rewriting without any UI or file I/O.
//!
//! [`DocumentRewriter`] bundles the two engines a configuration describes:
//! literal link replacements run first, then the GitHub URL categories.

use log::debug;

use crate::config::UpdateConfig;
use crate::engine::RewriteEngine;
use crate::engines::github_url_engine::GithubUrlEngine;
use crate::engines::link_engine::LinkEngine;
use crate::identity::TargetIdentity;
use crate::rewrite_match::RewriteMatch;

/// The full rewrite pipeline for one configuration and target.
///
/// Holds no per-document state, so one instance can be shared (e.g. behind
/// an `Arc`) by tasks processing different documents concurrently.
pub struct DocumentRewriter {
    engines: Vec<Box<dyn RewriteEngine>>,
}

impl DocumentRewriter {
    pub fn new(config: &UpdateConfig, target: &TargetIdentity) -> Self {
        let mut engines: Vec<Box<dyn RewriteEngine>> = Vec::with_capacity(2);
        if !config.links.is_empty() {
            engines.push(Box::new(LinkEngine::new(config.links.clone())));
        }
        if !config.github_urls.types.is_empty() {
            engines.push(Box::new(GithubUrlEngine::new(config.engine_options(target))));
        }
        Self { engines }
    }

    /// Builds a pipeline from explicit engines, applied in the given order.
    pub fn from_engines(engines: Vec<Box<dyn RewriteEngine>>) -> Self {
        Self { engines }
    }

    /// Runs every engine in order and returns the final text together with
    /// every occurrence the engines examined.
    pub fn rewrite(&self, content: &str, source_id: &str) -> (String, Vec<RewriteMatch>) {
        let mut current = content.to_string();
        let mut all_matches = Vec::new();
        for engine in &self.engines {
            let (next, matches) = engine.rewrite(&current, source_id);
            debug!("Engine '{}' examined {} occurrence(s) in '{}'.", engine.name(), matches.len(), source_id);
            current = next;
            all_matches.extend(matches);
        }
        (current, all_matches)
    }
}

/// Rewrites a single document according to `config`.
pub fn rewrite_document(
    config: &UpdateConfig,
    target: &TargetIdentity,
    content: &str,
    source_id: &str,
) -> (String, Vec<RewriteMatch>) {
    DocumentRewriter::new(config, target).rewrite(content, source_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GithubUrlsConfig, LinkRule, DEFAULT_COMMIT_MSG};
    use crate::patterns::UrlCategory;

    fn config(types: Vec<UrlCategory>, links: Vec<LinkRule>) -> UpdateConfig {
        UpdateConfig {
            paths: vec![".".to_string()],
            files: vec!["*.*".to_string()],
            ignore: vec!["node_modules".to_string()],
            links,
            github_urls: GithubUrlsConfig { types },
            create_pr: false,
            commit_msg: DEFAULT_COMMIT_MSG.to_string(),
        }
    }

    #[test]
    fn links_run_before_github_urls() {
        let cfg = config(
            vec![UrlCategory::Repo],
            vec![LinkRule {
                old: "https://gitlab.com/alice/foo".to_string(),
                new: "https://github.com/alice/foo".to_string(),
            }],
        );
        let target = TargetIdentity::new("bob", "bar");
        let (out, matches) = rewrite_document(&cfg, &target, "Mirror: https://gitlab.com/alice/foo", "README.md");
        assert_eq!(out, "Mirror: https://github.com/bob/bar");
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn empty_pipeline_returns_input() {
        let rewriter = DocumentRewriter::from_engines(Vec::new());
        let (out, matches) = rewriter.rewrite("https://github.com/alice/foo", "x");
        assert_eq!(out, "https://github.com/alice/foo");
        assert!(matches.is_empty());
    }
}
