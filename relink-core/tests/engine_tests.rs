// relink-core/tests/engine_tests.rs
//! End-to-end behavior of the GitHub URL engine: idempotence, target
//! preservation, tail and extension preservation, skip rules and the effect
//! of category order.

use relink_core::{
    rewrite_github_urls, EngineOptions, GithubUrlEngine, MatchOutcome, RewriteEngine, TargetIdentity,
    UrlCategory,
};

fn bob_bar() -> TargetIdentity {
    TargetIdentity::new("bob", "bar")
}

fn rewrite(text: &str, categories: &[UrlCategory]) -> String {
    rewrite_github_urls(text, categories, &[], &bob_bar())
}

const ALL_ORDERS: &[&[UrlCategory]] = &[
    &[UrlCategory::Username],
    &[UrlCategory::Repo],
    &[UrlCategory::Sponsors],
    &[UrlCategory::All],
    &[UrlCategory::Repo, UrlCategory::All],
    &[UrlCategory::All, UrlCategory::Repo],
    &[UrlCategory::Username, UrlCategory::Repo, UrlCategory::Sponsors, UrlCategory::All],
];

const SAMPLE_DOC: &str = "# foo\n\
[![CI](https://github.com/alice/foo/actions/workflows/ci.yml/badge.svg)](https://github.com/alice/foo/actions)\n\
Clone with `git clone https://github.com/alice/foo.git`.\n\
Made by https://github.com/alice\n\
Support: https://github.com/sponsors/alice\n\
Template: https://github.com/${{ github.repository }}\n\
Home: https://github.com and https://github.com/carol/\n";

#[test_log::test]
fn rewriting_twice_is_the_same_as_rewriting_once() {
    for categories in ALL_ORDERS {
        let once = rewrite(SAMPLE_DOC, categories);
        let twice = rewrite(&once, categories);
        assert_eq!(once, twice, "categories {:?} are not idempotent", categories);
    }
}

#[test]
fn urls_already_at_target_are_untouched() {
    let text = "https://github.com/bob/bar https://github.com/bob/bar.git https://github.com/bob/bar/tree/main https://github.com/bob";
    for categories in ALL_ORDERS {
        assert_eq!(rewrite(text, categories), text, "categories {:?}", categories);
    }

    // The repo category reads a sponsors page as `<owner>/<repo>`, so only
    // orders without it leave the page alone.
    let text = "https://github.com/sponsors/bob";
    for categories in ALL_ORDERS.iter().filter(|c| !c.contains(&UrlCategory::Repo)) {
        assert_eq!(rewrite(text, categories), text, "categories {:?}", categories);
    }
}

#[test]
fn repo_tail_is_preserved() {
    assert_eq!(
        rewrite("https://github.com/alice/foo/blob/main/readme.md", &[UrlCategory::Repo]),
        "https://github.com/bob/bar/blob/main/readme.md"
    );
    assert_eq!(
        rewrite("https://github.com/alice/foo/issues?q=is%3Aopen#top", &[UrlCategory::All]),
        "https://github.com/bob/bar/issues?q=is%3Aopen#top"
    );
}

#[test]
fn git_extension_is_preserved() {
    assert_eq!(rewrite("https://github.com/alice/foo.git", &[UrlCategory::Repo]), "https://github.com/bob/bar.git");
    assert_eq!(rewrite("https://github.com/alice/foo.git", &[UrlCategory::All]), "https://github.com/bob/bar.git");
    assert_eq!(
        rewrite("https://github.com/alice/foo.git/info/refs", &[UrlCategory::Repo]),
        "https://github.com/bob/bar.git/info/refs"
    );
}

#[test]
fn template_placeholders_are_never_rewritten() {
    let text = "https://github.com/${{ github.repository }}";
    for categories in ALL_ORDERS {
        assert_eq!(rewrite(text, categories), text);
    }
    let text = "https://github.com/alice/foo/releases/download/${VERSION}/foo.tar.gz";
    assert_eq!(rewrite(text, &[UrlCategory::Repo]), text);
}

#[test]
fn catch_all_rewrites_the_prefix_before_a_placeholder() {
    // The catch-all match ends at `$`, so the placeholder is outside it and
    // the repository prefix is still rewritten.
    let text = "https://github.com/alice/foo/releases/download/${VERSION}/foo.tar.gz";
    assert_eq!(
        rewrite(text, &[UrlCategory::All]),
        "https://github.com/bob/bar/releases/download/${VERSION}/foo.tar.gz"
    );
}

#[test]
fn ignore_entries_match_by_containment() {
    let ignore = vec!["github.com/alice".to_string()];
    let text = "https://github.com/alice/secret";
    assert_eq!(rewrite_github_urls(text, &[UrlCategory::Repo], &ignore, &bob_bar()), text);
    assert_eq!(rewrite_github_urls(text, &[UrlCategory::All], &ignore, &bob_bar()), text);

    // Containment is checked against the match, not the whole document.
    let text = "github.com/alice is mentioned, https://github.com/carol/x is not ignored";
    assert_eq!(
        rewrite_github_urls(text, &[UrlCategory::Repo], &ignore, &bob_bar()),
        "github.com/alice is mentioned, https://github.com/bob/bar is not ignored"
    );
}

#[test]
fn username_boundary() {
    assert_eq!(rewrite("https://github.com/alice", &[UrlCategory::Username]), "https://github.com/bob");
    assert_eq!(rewrite("https://github.com/alice/", &[UrlCategory::All]), "https://github.com/alice/");
    assert_eq!(rewrite("https://github.com/alice/", &[UrlCategory::Username]), "https://github.com/alice/");
}

#[test]
fn sponsors_owner_is_rewritten() {
    assert_eq!(
        rewrite("https://github.com/sponsors/alice", &[UrlCategory::Sponsors]),
        "https://github.com/sponsors/bob"
    );
}

#[test]
fn repo_category_rebuilds_sponsors_pages_as_repositories() {
    assert_eq!(
        rewrite("https://github.com/sponsors/alice", &[UrlCategory::Repo]),
        "https://github.com/bob/bar"
    );
    // Categories apply in sequence: the sponsors pass runs on the repo
    // pass's output and finds nothing left to do.
    assert_eq!(
        rewrite("https://github.com/sponsors/alice", &[UrlCategory::Repo, UrlCategory::Sponsors]),
        "https://github.com/bob/bar"
    );
    assert_eq!(
        rewrite("https://github.com/sponsors/alice", &[UrlCategory::Sponsors, UrlCategory::Repo]),
        "https://github.com/bob/bar"
    );
}

#[test]
fn later_categories_see_earlier_rewrites() {
    let text = "repo https://github.com/bob/bar and author https://github.com/alice";
    assert_eq!(
        rewrite(text, &[UrlCategory::Repo, UrlCategory::All]),
        "repo https://github.com/bob/bar and author https://github.com/bob"
    );
}

#[test]
fn sample_document_under_catch_all() {
    let expected = "# foo\n\
[![CI](https://github.com/bob/bar/actions/workflows/ci.yml/badge.svg)](https://github.com/bob/bar/actions)\n\
Clone with `git clone https://github.com/bob/bar.git`.\n\
Made by https://github.com/bob\n\
Support: https://github.com/sponsors/bob\n\
Template: https://github.com/${{ github.repository }}\n\
Home: https://github.com and https://github.com/carol/\n";
    assert_eq!(rewrite(SAMPLE_DOC, &[UrlCategory::All]), expected);
}

#[test]
fn non_github_hosts_are_ignored() {
    let text = "https://gitlab.com/alice/foo https://github.community/t/1 https://raw.githubusercontent.com/alice/foo/main/x";
    assert_eq!(rewrite(text, &[UrlCategory::All]), text);
}

#[test]
fn engine_report_matches_output() {
    let engine = GithubUrlEngine::new(EngineOptions::new(
        vec![UrlCategory::Repo, UrlCategory::All],
        vec![],
        bob_bar(),
    ));
    let (out, matches) = engine.rewrite(SAMPLE_DOC, "README.md");
    assert_eq!(out, rewrite(SAMPLE_DOC, &[UrlCategory::Repo, UrlCategory::All]));

    let rewritten: Vec<_> = matches.iter().filter(|m| m.outcome == MatchOutcome::Rewritten).collect();
    // Four repo-shaped URLs (the sponsors page included) in the repo pass,
    // then the profile URL in the catch-all pass.
    assert_eq!(rewritten.len(), 5);
    assert!(matches
        .iter()
        .any(|m| m.rule_name == "all" && m.outcome == MatchOutcome::Unclassifiable));
    assert_eq!(engine.find_rewrites(SAMPLE_DOC, "README.md"), matches);
}
