//! patterns.rs - The registry of recognized GitHub URL shapes.
//!
//! Each [`UrlCategory`] owns one compiled regular expression used to find
//! candidate occurrences in a text body. The catch-all `all` pattern only
//! finds candidates; [`classify`] decides which concrete category such a
//! candidate belongs to. The extractors at the bottom of this module locate
//! the owner/repository segments inside an already-matched URL so the engine
//! can splice replacements by byte span.
//!
//! All patterns are compiled once per process and shared.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::errors::RelinkError;

/// The four URL classification tags.
///
/// `All` is a meta-category: matches found with its pattern are always
/// re-classified into one of the other three (or skipped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlCategory {
    Username,
    Repo,
    Sponsors,
    All,
}

impl UrlCategory {
    /// Every valid tag, in documentation order.
    pub const ALL_TAGS: [&'static str; 4] = ["username", "repo", "sponsors", "all"];

    pub fn as_str(&self) -> &'static str {
        match self {
            UrlCategory::Username => "username",
            UrlCategory::Repo => "repo",
            UrlCategory::Sponsors => "sponsors",
            UrlCategory::All => "all",
        }
    }

    /// The pattern used to scan text for occurrences of this category.
    pub fn pattern(&self) -> &'static Regex {
        match self {
            UrlCategory::Username => &USERNAME_URL,
            UrlCategory::Repo => &REPO_URL,
            UrlCategory::Sponsors => &SPONSORS_URL,
            UrlCategory::All => &ANY_GITHUB_URL,
        }
    }
}

impl fmt::Display for UrlCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrlCategory {
    type Err = RelinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "username" => Ok(UrlCategory::Username),
            "repo" => Ok(UrlCategory::Repo),
            "sponsors" => Ok(UrlCategory::Sponsors),
            "all" => Ok(UrlCategory::All),
            other => Err(RelinkError::UnknownCategory(other.to_string())),
        }
    }
}

lazy_static! {
    /// A profile root URL. The occurrence includes the single whitespace
    /// character that terminates it, or ends at end of input.
    static ref USERNAME_URL: Regex =
        Regex::new(r"https?://github\.com/([a-zA-Z0-9-]+)(?:\s|$)").expect("username pattern");

    /// `<owner>/<repo>` plus an optional opaque tail up to whitespace or `)`.
    static ref REPO_URL: Regex =
        Regex::new(r"https?://github\.com/([a-zA-Z0-9-]+)/([a-zA-Z0-9_.-]+)(?:/[^)\s]*)?")
            .expect("repo pattern");

    static ref SPONSORS_URL: Regex =
        Regex::new(r"https?://github\.com/sponsors/([a-zA-Z0-9-]+)").expect("sponsors pattern");

    /// The catch-all candidate finder. Stops at whitespace, `)`, `$`, `{` and `}`.
    static ref ANY_GITHUB_URL: Regex =
        Regex::new(r"https?://github\.com(?:/[^)\s$\{\}\n]*)?").expect("catch-all pattern");

    static ref TEMPLATE_PLACEHOLDER: Regex = Regex::new(r"\$\{[^}]*\}").expect("template pattern");

    static ref OWNER_SEGMENT: Regex = Regex::new(r"github\.com/([a-zA-Z0-9-]+)").expect("owner extractor");

    static ref SPONSORS_SEGMENT: Regex = Regex::new(r"sponsors/([a-zA-Z0-9-]+)").expect("sponsors extractor");

    static ref REPO_SEGMENTS: Regex =
        Regex::new(r"github\.com/([a-zA-Z0-9-]+)/([a-zA-Z0-9_.-]+)").expect("repo extractor");
}

const GIT_EXTENSION: &str = ".git";

/// Resolves a candidate URL into a concrete category.
///
/// Anything containing `/sponsors/` is a sponsors URL. Otherwise the URL is
/// split on `/` with empty pieces dropped (so the scheme and host count as
/// two pieces): four or more pieces is a repository URL, exactly three
/// without a trailing slash is a profile URL. Everything else is ambiguous
/// and yields `None`.
pub fn classify(url: &str) -> Option<UrlCategory> {
    if url.contains("/sponsors/") {
        return Some(UrlCategory::Sponsors);
    }
    let pieces = url.split('/').filter(|p| !p.is_empty()).count();
    if pieces >= 4 {
        Some(UrlCategory::Repo)
    } else if pieces == 3 && !url.ends_with('/') {
        Some(UrlCategory::Username)
    } else {
        None
    }
}

/// True when `s` contains an unresolved `${...}` placeholder.
pub fn is_template_placeholder(s: &str) -> bool {
    TEMPLATE_PLACEHOLDER.is_match(s)
}

/// Byte span of the owner segment directly after `github.com/`.
pub fn owner_span(url: &str) -> Option<Range<usize>> {
    OWNER_SEGMENT.captures(url).and_then(|caps| caps.get(1)).map(|m| m.range())
}

/// Byte span of the owner segment directly after `sponsors/`.
pub fn sponsors_owner_span(url: &str) -> Option<Range<usize>> {
    SPONSORS_SEGMENT.captures(url).and_then(|caps| caps.get(1)).map(|m| m.range())
}

/// Located segments of a repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSegments {
    pub owner: Range<usize>,
    pub name: Range<usize>,
    /// Either empty or exactly the `.git` suffix following `name`.
    pub extension: Range<usize>,
}

impl RepoSegments {
    /// Offset of the first byte after the name and its extension.
    pub fn tail_start(&self) -> usize {
        self.extension.end
    }
}

/// Finds the owner, repository name and optional `.git` extension of a
/// repository URL.
///
/// The name is the full `[A-Za-z0-9_.-]+` segment; only a trailing `.git`
/// with a non-empty stem is split off as the extension.
pub fn repo_segments(url: &str) -> Option<RepoSegments> {
    let caps = REPO_SEGMENTS.captures(url)?;
    let owner = caps.get(1)?.range();
    let raw_name = caps.get(2)?;

    let name_start = raw_name.start();
    let mut name_end = raw_name.end();
    let mut extension = name_end..name_end;

    if let Some(stem) = raw_name.as_str().strip_suffix(GIT_EXTENSION) {
        if !stem.is_empty() {
            name_end = name_start + stem.len();
            extension = name_end..name_end + GIT_EXTENSION.len();
        }
    }

    Some(RepoSegments {
        owner,
        name: name_start..name_end,
        extension,
    })
}
