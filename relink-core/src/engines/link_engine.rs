// relink-core/src/engines/link_engine.rs
//! A `RewriteEngine` for literal `old -> new` link replacements.
//!
//! Rules run in order and each one sees the output of the previous rule.
//!
//! License: MIT OR APACHE 2.0

use crate::config::LinkRule;
use crate::engine::RewriteEngine;
use crate::rewrite_match::{log_decision_debug, MatchOutcome, RewriteMatch};

pub const LINK_RULE_NAME: &str = "link";

#[derive(Debug, Clone, Default)]
pub struct LinkEngine {
    rules: Vec<LinkRule>,
}

impl LinkEngine {
    pub fn new(rules: Vec<LinkRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[LinkRule] {
        &self.rules
    }
}

impl RewriteEngine for LinkEngine {
    fn name(&self) -> &'static str {
        "links"
    }

    fn rewrite(&self, content: &str, source_id: &str) -> (String, Vec<RewriteMatch>) {
        let mut current = content.to_string();
        let mut matches = Vec::new();

        for rule in self.rules.iter().filter(|r| !r.old.is_empty() && r.old != r.new) {
            let mut output = String::with_capacity(current.len());
            let mut last_end = 0usize;
            for (start, found) in current.match_indices(rule.old.as_str()) {
                output.push_str(&current[last_end..start]);
                output.push_str(&rule.new);
                last_end = start + found.len();

                let m = RewriteMatch {
                    rule_name: LINK_RULE_NAME.to_string(),
                    category: None,
                    outcome: MatchOutcome::Rewritten,
                    original_string: found.to_string(),
                    rewritten_string: rule.new.clone(),
                    start: start as u64,
                    end: last_end as u64,
                    source_id: source_id.to_string(),
                };
                log_decision_debug(module_path!(), &m);
                matches.push(m);
            }
            output.push_str(&current[last_end..]);
            current = output;
        }

        (current, matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(old: &str, new: &str) -> LinkRule {
        LinkRule {
            old: old.to_string(),
            new: new.to_string(),
        }
    }

    #[test]
    fn replaces_every_occurrence_in_order() {
        let engine = LinkEngine::new(vec![
            rule("https://old.example.com", "https://new.example.com"),
            rule("new.example.com/docs", "docs.example.com"),
        ]);
        let (out, matches) = engine.rewrite(
            "a https://old.example.com/docs b https://old.example.com",
            "doc.md",
        );
        assert_eq!(out, "a https://docs.example.com b https://new.example.com");
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn identical_rules_are_skipped() {
        let engine = LinkEngine::new(vec![rule("same", "same")]);
        let (out, matches) = engine.rewrite("same same", "x");
        assert_eq!(out, "same same");
        assert!(matches.is_empty());
    }
}
