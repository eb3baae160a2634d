//! Configuration management for `relink-core`.
//!
//! This module reads the YAML configuration file, fills in defaults,
//! validates every field and resolves `${{ ... }}` templates in link
//! replacements. The engines only ever see a validated [`UpdateConfig`].
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::engine::EngineOptions;
use crate::errors::RelinkError;
use crate::identity::TargetIdentity;
use crate::patterns::UrlCategory;

/// Where the configuration is looked for when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = ".github/updatelinks.yml";

pub const DEFAULT_COMMIT_MSG: &str = "chore: update repository links and keywords[skip ci]";

const REPOSITORY_TEMPLATE: &str = "${{ github.repository }}";

fn default_paths() -> Vec<String> {
    vec![".".to_string()]
}

fn default_files() -> Vec<String> {
    vec!["*.*".to_string()]
}

fn default_ignore() -> Vec<String> {
    vec!["node_modules".to_string(), ".git".to_string()]
}

/// A literal `old -> new` replacement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct LinkRule {
    pub old: String,
    pub new: String,
}

/// The `githubUrls` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GithubUrlsConfig {
    pub types: Vec<UrlCategory>,
}

/// A validated configuration with every default applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfig {
    /// Roots to walk.
    pub paths: Vec<String>,
    /// File name globs selecting which files are processed.
    pub files: Vec<String>,
    /// Path names to skip while walking, and substrings that suppress URL
    /// rewriting when contained in a match.
    pub ignore: Vec<String>,
    pub links: Vec<LinkRule>,
    pub github_urls: GithubUrlsConfig,
    pub create_pr: bool,
    pub commit_msg: String,
}

// Everything optional so defaults and validation messages stay under our control.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawConfig {
    paths: Option<Vec<String>>,
    files: Option<Vec<String>>,
    ignore: Option<Vec<String>>,
    links: Option<Vec<RawLink>>,
    github_urls: Option<RawGithubUrls>,
    create_pr: Option<serde_yml::Value>,
    commit_msg: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLink {
    old: Option<String>,
    new: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawGithubUrls {
    types: Option<Vec<String>>,
}

static BARE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\.?[a-zA-Z0-9_-]+$").expect("bare name pattern"));
static NAME_WITH_EXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+\.[a-zA-Z0-9]+$").expect("name.ext pattern"));
static STAR_EXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*\.(?:\*|[a-zA-Z0-9.]+)$").expect("*.ext pattern"));
static DIR_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9/_-]+$").expect("path pattern"));
static COMPLETE_GITHUB_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://github\.com/[a-zA-Z0-9-]+(?:/[a-zA-Z0-9_.-]+)?(?:\.git)?$").expect("github url pattern")
});
static SECRET_TEMPLATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{\{\s*secrets\.(\w+)\s*\}\}").expect("secret template pattern"));

impl UpdateConfig {
    /// Loads and validates the configuration at `path`, or at
    /// [`DEFAULT_CONFIG_PATH`] when `path` is `None`.
    ///
    /// `${{ secrets.NAME }}` templates are resolved from the process environment.
    pub fn load_from_file(path: Option<&Path>, target: &TargetIdentity) -> Result<Self> {
        let path = resolve_config_path(path);
        info!("Looking for config at: {}", path.display());

        if !path.exists() {
            warn!("Configuration file not found at {}", path.display());
            return Err(RelinkError::ConfigNotFound(path)).context("Error parsing configuration");
        }

        let text = std::fs::read_to_string(&path)
            .map_err(RelinkError::from)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        debug!("Config file content: {}", text);

        let config = Self::from_yaml_str(&text, target).context("Error parsing configuration")?;
        info!(
            "Loaded config from {}: {} URL categories, {} link rules.",
            path.display(),
            config.github_urls.types.len(),
            config.links.len()
        );
        Ok(config)
    }

    /// Parses and validates a YAML document, resolving secrets from the
    /// process environment.
    pub fn from_yaml_str(text: &str, target: &TargetIdentity) -> Result<Self, RelinkError> {
        Self::from_yaml_str_with(text, target, |key| std::env::var(key).ok())
    }

    /// Same as [`UpdateConfig::from_yaml_str`] with an explicit secret lookup.
    pub fn from_yaml_str_with<F>(text: &str, target: &TargetIdentity, lookup: F) -> Result<Self, RelinkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if text.trim().is_empty() {
            return Err(RelinkError::EmptyConfig);
        }
        let raw: Option<RawConfig> = serde_yml::from_str(text)?;
        let raw = raw.ok_or(RelinkError::EmptyConfig)?;
        debug!("Parsed config: {:?}", raw);
        validate_and_normalize(raw, target, &lookup)
    }

    /// Engine options for the GitHub URL engine.
    pub fn engine_options(&self, target: &TargetIdentity) -> EngineOptions {
        EngineOptions::new(self.github_urls.types.clone(), self.ignore.clone(), target.clone())
    }
}

/// The configuration path to use, falling back to [`DEFAULT_CONFIG_PATH`].
pub fn resolve_config_path(path: Option<&Path>) -> PathBuf {
    match path {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from(DEFAULT_CONFIG_PATH),
    }
}

fn validate_and_normalize<F>(raw: RawConfig, target: &TargetIdentity, lookup: &F) -> Result<UpdateConfig, RelinkError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw_types = raw.github_urls.and_then(|g| g.types).unwrap_or_default();
    let raw_links = raw.links.unwrap_or_default();

    if raw_types.is_empty() && raw_links.is_empty() {
        return Err(RelinkError::InvalidConfig(
            "At least one of githubUrls.types or links must be configured".to_string(),
        ));
    }

    let types = parse_categories(&raw_types)?;

    let paths = raw.paths.unwrap_or_else(default_paths);
    let files = raw.files.unwrap_or_else(default_files);
    let ignore = raw.ignore.unwrap_or_else(default_ignore);

    if !files.iter().all(|f| is_valid_file_pattern(f)) {
        return Err(RelinkError::InvalidConfig("Invalid file type pattern detected".to_string()));
    }

    let invalid_ignore: Vec<&str> = ignore
        .iter()
        .filter(|p| !is_valid_file_pattern(p))
        .map(String::as_str)
        .collect();
    if !invalid_ignore.is_empty() {
        return Err(RelinkError::InvalidConfig(format!(
            "Invalid ignore patterns: {}",
            invalid_ignore.join(", ")
        )));
    }

    let incomplete_urls: Vec<&str> = ignore
        .iter()
        .filter(|p| p.starts_with("https://github.com/") && !COMPLETE_GITHUB_URL.is_match(p))
        .map(String::as_str)
        .collect();
    if !incomplete_urls.is_empty() {
        return Err(RelinkError::InvalidConfig(format!(
            "Invalid GitHub URLs in ignore list: {}",
            incomplete_urls.join(", ")
        )));
    }

    let mut links = Vec::with_capacity(raw_links.len());
    for link in raw_links {
        match (link.old, link.new) {
            (Some(old), Some(new)) if !old.is_empty() && !new.is_empty() => {
                let new = process_template(&new, target, lookup);
                links.push(LinkRule { old, new });
            }
            _ => {
                return Err(RelinkError::InvalidConfig(
                    "Each link must have both old and new properties".to_string(),
                ))
            }
        }
    }

    let create_pr = raw.create_pr.and_then(|v| v.as_bool()).unwrap_or(false);
    let commit_msg = raw
        .commit_msg
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_COMMIT_MSG.to_string());

    Ok(UpdateConfig {
        paths,
        files,
        ignore,
        links,
        github_urls: GithubUrlsConfig { types },
        create_pr,
        commit_msg,
    })
}

/// Converts tags to categories, reporting every unknown tag at once.
pub fn parse_categories<S: AsRef<str>>(tags: &[S]) -> Result<Vec<UrlCategory>, RelinkError> {
    let mut categories = Vec::with_capacity(tags.len());
    let mut invalid = Vec::new();
    for tag in tags {
        match tag.as_ref().parse::<UrlCategory>() {
            Ok(category) => categories.push(category),
            Err(_) => invalid.push(tag.as_ref().to_string()),
        }
    }
    if invalid.is_empty() {
        Ok(categories)
    } else {
        Err(RelinkError::InvalidCategories {
            invalid,
            valid: UrlCategory::ALL_TAGS.to_vec(),
        })
    }
}

/// Accepts URLs, bare names (optionally dot-prefixed), `name.ext`, `*.ext`
/// (including the `*.*` default) and plain directory paths.
pub fn is_valid_file_pattern(pattern: &str) -> bool {
    if pattern.starts_with("http") {
        return url::Url::parse(pattern).is_ok();
    }
    BARE_NAME.is_match(pattern)
        || NAME_WITH_EXT.is_match(pattern)
        || STAR_EXT.is_match(pattern)
        || DIR_PATH.is_match(pattern)
}

/// Resolves `${{ ... }}` templates in a link replacement.
///
/// A value mentioning `${{ github.repository }}` becomes the target
/// repository URL as a whole. Otherwise each `${{ secrets.NAME }}` is
/// replaced by `lookup(NAME)`, or removed when the lookup has no value.
pub fn process_template<F>(value: &str, target: &TargetIdentity, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if value.contains(REPOSITORY_TEMPLATE) {
        return target.url();
    }
    SECRET_TEMPLATE
        .replace_all(value, |caps: &regex::Captures| {
            let key = &caps[1];
            lookup(key).unwrap_or_else(|| {
                warn!("Secret '{}' referenced in links is not set; substituting an empty string.", key);
                String::new()
            })
        })
        .into_owned()
}
