// relink-core/src/engines/github_url_engine.rs
//! A `RewriteEngine` that classifies GitHub URLs and points them at a target
//! owner/repository.
//!
//! Categories are applied one after another in the configured order; each
//! pass scans the output of the previous one. Within a pass every occurrence
//! goes through the same three steps: skip checks (ignore list, then template
//! placeholders), category resolution (only for the catch-all pass), and a
//! span-based splice that touches nothing but the owner (and, for
//! repositories, the name) segment.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use std::ops::Range;

use crate::engine::{EngineOptions, RewriteEngine};
use crate::identity::TargetIdentity;
use crate::patterns::{self, UrlCategory};
use crate::rewrite_match::{log_decision_debug, MatchOutcome, RewriteMatch};

#[derive(Debug, Clone)]
pub struct GithubUrlEngine {
    options: EngineOptions,
}

impl GithubUrlEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }
}

impl RewriteEngine for GithubUrlEngine {
    fn name(&self) -> &'static str {
        "github-urls"
    }

    fn rewrite(&self, content: &str, source_id: &str) -> (String, Vec<RewriteMatch>) {
        let mut matches = Vec::new();
        let output = rewrite_all_passes(
            content,
            &self.options.categories,
            &self.options.ignore,
            &self.options.target,
            source_id,
            &mut matches,
        );
        (output, matches)
    }
}

/// Rewrites every GitHub URL in `text` toward `target`.
///
/// Categories are applied in the given order, each pass operating on the
/// result of the previous one. Occurrences containing any `ignore` entry,
/// or a `${...}` placeholder, are left untouched, as are URLs that already
/// point at `target` and catch-all candidates that cannot be classified.
pub fn rewrite_github_urls(
    text: &str,
    categories: &[UrlCategory],
    ignore: &[String],
    target: &TargetIdentity,
) -> String {
    let mut discarded = Vec::new();
    rewrite_all_passes(text, categories, ignore, target, "", &mut discarded)
}

fn rewrite_all_passes(
    text: &str,
    categories: &[UrlCategory],
    ignore: &[String],
    target: &TargetIdentity,
    source_id: &str,
    matches: &mut Vec<RewriteMatch>,
) -> String {
    if categories.is_empty() {
        debug!("No URL categories enabled; '{}' left as is.", source_id);
        return text.to_string();
    }
    let mut current = text.to_string();
    for &category in categories {
        current = rewrite_pass(&current, category, ignore, target, source_id, matches);
    }
    current
}

/// One scan over `content` with `category`'s pattern, splicing each
/// occurrence's replacement between the untouched stretches around it.
fn rewrite_pass(
    content: &str,
    category: UrlCategory,
    ignore: &[String],
    target: &TargetIdentity,
    source_id: &str,
    matches: &mut Vec<RewriteMatch>,
) -> String {
    let mut output = String::with_capacity(content.len());
    let mut last_end = 0usize;

    for found in category.pattern().find_iter(content) {
        output.push_str(&content[last_end..found.start()]);
        let original = found.as_str();
        let decision = decide(category, original, ignore, target);
        output.push_str(&decision.replacement);
        last_end = found.end();

        let m = RewriteMatch {
            rule_name: category.as_str().to_string(),
            category: decision.resolved,
            outcome: decision.outcome,
            original_string: original.to_string(),
            rewritten_string: decision.replacement,
            start: found.start() as u64,
            end: found.end() as u64,
            source_id: source_id.to_string(),
        };
        log_decision_debug(module_path!(), &m);
        matches.push(m);
    }
    output.push_str(&content[last_end..]);
    output
}

struct Decision {
    resolved: Option<UrlCategory>,
    outcome: MatchOutcome,
    replacement: String,
}

impl Decision {
    fn keep(resolved: Option<UrlCategory>, outcome: MatchOutcome, original: &str) -> Self {
        Self {
            resolved,
            outcome,
            replacement: original.to_string(),
        }
    }
}

fn decide(category: UrlCategory, original: &str, ignore: &[String], target: &TargetIdentity) -> Decision {
    if ignore.iter().any(|entry| original.contains(entry.as_str())) {
        return Decision::keep(None, MatchOutcome::Ignored, original);
    }
    if patterns::is_template_placeholder(original) {
        return Decision::keep(None, MatchOutcome::Template, original);
    }

    let resolved = match category {
        UrlCategory::All => match patterns::classify(original) {
            Some(concrete) => concrete,
            None => return Decision::keep(None, MatchOutcome::Unclassifiable, original),
        },
        concrete => concrete,
    };

    let rewritten = match resolved {
        UrlCategory::Username => replace_owner(original, patterns::owner_span(original), &target.owner),
        UrlCategory::Sponsors => {
            replace_owner(original, patterns::sponsors_owner_span(original), &target.owner)
        }
        UrlCategory::Repo => replace_repo(original, target),
        // `classify` never yields the catch-all tag.
        UrlCategory::All => Splice::Missing,
    };

    match rewritten {
        Splice::Missing => Decision::keep(Some(resolved), MatchOutcome::Unclassifiable, original),
        Splice::Unchanged => Decision::keep(Some(resolved), MatchOutcome::AlreadyTarget, original),
        Splice::Replaced(replacement) => Decision {
            resolved: Some(resolved),
            outcome: MatchOutcome::Rewritten,
            replacement,
        },
    }
}

enum Splice {
    /// The expected segment is not present in the occurrence.
    Missing,
    /// The occurrence already points at the target.
    Unchanged,
    Replaced(String),
}

fn replace_owner(original: &str, span: Option<Range<usize>>, owner: &str) -> Splice {
    let Some(span) = span else {
        return Splice::Missing;
    };
    if &original[span.clone()] == owner {
        return Splice::Unchanged;
    }
    let mut out = String::with_capacity(original.len() + owner.len());
    out.push_str(&original[..span.start]);
    out.push_str(owner);
    out.push_str(&original[span.end..]);
    Splice::Replaced(out)
}

/// Rebuilds a repository URL as `https://github.com/<owner>/<repo><ext><tail>`.
fn replace_repo(original: &str, target: &TargetIdentity) -> Splice {
    let Some(segments) = patterns::repo_segments(original) else {
        return Splice::Missing;
    };
    let owner = &original[segments.owner.clone()];
    let name = &original[segments.name.clone()];
    if owner == target.owner && name == target.repo {
        return Splice::Unchanged;
    }
    let extension = &original[segments.extension.clone()];
    let tail = &original[segments.tail_start()..];
    Splice::Replaced(format!(
        "https://github.com/{}/{}{}{}",
        target.owner, target.repo, extension, tail
    ))
}
