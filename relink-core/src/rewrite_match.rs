// relink-core/src/rewrite_match.rs
//! Data structures for reporting what the engines did with each occurrence
//! they found, plus the per-rule summary shown by the CLI.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::patterns::UrlCategory;

/// What the engine decided for one occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// The occurrence was replaced.
    Rewritten,
    /// The occurrence already points at the target identity.
    AlreadyTarget,
    /// An ignore-list entry is contained in the occurrence.
    Ignored,
    /// The occurrence contains a `${...}` placeholder.
    Template,
    /// A catch-all candidate could not be resolved to a concrete category,
    /// or the expected owner/repository segments were not found.
    Unclassifiable,
}

impl MatchOutcome {
    pub fn is_rewrite(&self) -> bool {
        matches!(self, MatchOutcome::Rewritten)
    }
}

/// A single occurrence found by an engine during one scan pass.
///
/// `start`/`end` are byte offsets into the text as it stood at the beginning
/// of the pass that produced the match (categories are applied sequentially,
/// so later passes see already-rewritten text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteMatch {
    /// The pass that found the occurrence, e.g. `repo`, `all` or `link`.
    pub rule_name: String,
    /// The concrete category the occurrence was handled as, if any.
    #[serde(default)]
    pub category: Option<UrlCategory>,
    pub outcome: MatchOutcome,
    pub original_string: String,
    pub rewritten_string: String,
    pub start: u64,
    pub end: u64,
    #[serde(default)]
    pub source_id: String,
}

/// Rewritten occurrences grouped under one rule name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteSummaryItem {
    pub rule_name: String,
    pub occurrences: usize,
    pub original_texts: Vec<String>,
    pub rewritten_texts: Vec<String>,
}

/// Groups rewritten occurrences by rule name, keeping first-seen order.
/// Occurrences that were left unchanged are not counted.
pub fn summarize(matches: &[RewriteMatch]) -> Vec<RewriteSummaryItem> {
    let mut summary: Vec<RewriteSummaryItem> = Vec::new();
    for m in matches.iter().filter(|m| m.outcome.is_rewrite()) {
        let idx = match summary.iter().position(|s| s.rule_name == m.rule_name) {
            Some(idx) => idx,
            None => {
                summary.push(RewriteSummaryItem {
                    rule_name: m.rule_name.clone(),
                    occurrences: 0,
                    original_texts: Vec::new(),
                    rewritten_texts: Vec::new(),
                });
                summary.len() - 1
            }
        };
        let item = &mut summary[idx];
        item.occurrences += 1;
        item.original_texts.push(m.original_string.clone());
        item.rewritten_texts.push(m.rewritten_string.clone());
    }
    summary
}

/// Merges two summaries, adding counts for rule names present in both.
pub fn merge_summaries(into: &mut Vec<RewriteSummaryItem>, other: Vec<RewriteSummaryItem>) {
    for item in other {
        match into.iter_mut().find(|s| s.rule_name == item.rule_name) {
            Some(existing) => {
                existing.occurrences += item.occurrences;
                existing.original_texts.extend(item.original_texts);
                existing.rewritten_texts.extend(item.rewritten_texts);
            }
            None => into.push(item),
        }
    }
}

pub(crate) fn log_decision_debug(module_path: &str, m: &RewriteMatch) {
    debug!(
        "{} [{}] {:?}: '{}' -> '{}'",
        module_path, m.rule_name, m.outcome, m.original_string, m.rewritten_string
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occurrence(rule: &str, outcome: MatchOutcome, from: &str, to: &str) -> RewriteMatch {
        RewriteMatch {
            rule_name: rule.to_string(),
            category: None,
            outcome,
            original_string: from.to_string(),
            rewritten_string: to.to_string(),
            start: 0,
            end: from.len() as u64,
            source_id: "test".to_string(),
        }
    }

    #[test]
    fn summary_counts_only_rewrites() {
        let matches = vec![
            occurrence("repo", MatchOutcome::Rewritten, "a", "b"),
            occurrence("repo", MatchOutcome::AlreadyTarget, "b", "b"),
            occurrence("all", MatchOutcome::Ignored, "c", "c"),
            occurrence("repo", MatchOutcome::Rewritten, "d", "b"),
        ];
        let summary = summarize(&matches);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].rule_name, "repo");
        assert_eq!(summary[0].occurrences, 2);
        assert_eq!(summary[0].original_texts, vec!["a", "d"]);
    }

    #[test]
    fn merge_adds_counts() {
        let mut left = summarize(&[occurrence("repo", MatchOutcome::Rewritten, "a", "b")]);
        let right = summarize(&[
            occurrence("repo", MatchOutcome::Rewritten, "c", "b"),
            occurrence("link", MatchOutcome::Rewritten, "x", "y"),
        ]);
        merge_summaries(&mut left, right);
        assert_eq!(left.len(), 2);
        assert_eq!(left[0].occurrences, 2);
        assert_eq!(left[1].rule_name, "link");
    }

    #[test]
    fn serializes_outcome_as_snake_case() {
        let m = occurrence("repo", MatchOutcome::AlreadyTarget, "a", "a");
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["outcome"], "already_target");
        assert_eq!(value["rule_name"], "repo");
    }
}
