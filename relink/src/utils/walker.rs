// relink/src/utils/walker.rs
//! File discovery for `apply` and `check`.
//!
//! Every configured root is walked recursively. A file is selected when its
//! name (or its path relative to the root) matches one of the `files` globs.
//! Any directory or file whose name matches a non-URL `ignore` entry is
//! pruned, as is anything below an ignored relative path.

use anyhow::{Context, Result};
use glob::Pattern;
use log::{debug, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use relink_core::UpdateConfig;

/// Compiled `files` and `ignore` globs.
#[derive(Debug)]
pub struct FileFilter {
    include: Vec<Pattern>,
    ignore: Vec<Pattern>,
}

fn is_url(pattern: &str) -> bool {
    pattern.starts_with("http")
}

impl FileFilter {
    pub fn new(files: &[String], ignore: &[String]) -> Result<Self> {
        let compile = |patterns: &[String]| -> Result<Vec<Pattern>> {
            patterns
                .iter()
                .filter(|p| !is_url(p))
                .map(|p| Pattern::new(p).with_context(|| format!("Invalid glob pattern '{}'", p)))
                .collect()
        };
        Ok(Self {
            include: compile(files)?,
            ignore: compile(ignore)?,
        })
    }

    /// True when `relative` (or its last component) is ignored.
    pub fn is_ignored(&self, relative: &Path) -> bool {
        let name = relative.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let rel = normalized(relative);
        self.ignore.iter().any(|p| {
            p.matches(name) || p.matches(&rel) || rel.starts_with(&format!("{}/", p.as_str()))
        })
    }

    /// True when `relative` should be processed.
    pub fn is_included(&self, relative: &Path) -> bool {
        let name = relative.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let rel = normalized(relative);
        self.include.iter().any(|p| p.matches(name) || p.matches(&rel))
    }
}

fn normalized(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Lists every file the configuration selects, sorted and de-duplicated.
pub fn discover_files(config: &UpdateConfig) -> Result<Vec<PathBuf>> {
    let filter = FileFilter::new(&config.files, &config.ignore)?;
    let mut found = BTreeSet::new();

    for root in &config.paths {
        let root = Path::new(root);
        if !root.exists() {
            warn!("Configured path '{}' does not exist; skipping.", root.display());
            continue;
        }
        if root.is_file() {
            // Explicitly listed files are taken as-is.
            found.insert(root.to_path_buf());
            continue;
        }

        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !filter.is_ignored(relative_to(root, entry)));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() && filter.is_included(relative_to(root, &entry)) {
                let path = entry.path();
                found.insert(path.strip_prefix(".").unwrap_or(path).to_path_buf());
            }
        }
    }

    debug!("Discovered {} file(s).", found.len());
    Ok(found.into_iter().collect())
}

fn relative_to<'a>(root: &Path, entry: &'a DirEntry) -> &'a Path {
    entry.path().strip_prefix(root).unwrap_or(entry.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(files: &[&str], ignore: &[&str]) -> FileFilter {
        let files: Vec<String> = files.iter().map(|s| s.to_string()).collect();
        let ignore: Vec<String> = ignore.iter().map(|s| s.to_string()).collect();
        FileFilter::new(&files, &ignore).unwrap()
    }

    #[test]
    fn includes_by_name_glob() {
        let f = filter(&["*.md", "LICENSE"], &[]);
        assert!(f.is_included(Path::new("docs/guide.md")));
        assert!(f.is_included(Path::new("LICENSE")));
        assert!(!f.is_included(Path::new("src/main.rs")));
    }

    #[test]
    fn ignores_by_component_and_prefix() {
        let f = filter(&["*.*"], &["node_modules", ".git", "docs/generated", "https://github.com/alice"]);
        assert!(f.is_ignored(Path::new("node_modules")));
        assert!(f.is_ignored(Path::new("web/node_modules")));
        assert!(f.is_ignored(Path::new(".git")));
        assert!(f.is_ignored(Path::new("docs/generated")));
        assert!(f.is_ignored(Path::new("docs/generated/api.md")));
        assert!(!f.is_ignored(Path::new("docs/guide.md")));
        assert!(!f.is_ignored(Path::new(".github")));
    }

    #[test]
    fn discovers_sorted_files_and_prunes_ignored_dirs() {
        use relink_core::{GithubUrlsConfig, UrlCategory, DEFAULT_COMMIT_MSG};
        use std::fs;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("README.md"), "a").unwrap();
        fs::write(root.join("docs/guide.md"), "b").unwrap();
        fs::write(root.join("docs/notes.txt"), "c").unwrap();
        fs::write(root.join("node_modules/pkg/README.md"), "d").unwrap();

        let config = UpdateConfig {
            paths: vec![root.to_string_lossy().into_owned(), "missing-dir".to_string()],
            files: vec!["*.md".to_string()],
            ignore: vec!["node_modules".to_string()],
            links: Vec::new(),
            github_urls: GithubUrlsConfig { types: vec![UrlCategory::All] },
            create_pr: false,
            commit_msg: DEFAULT_COMMIT_MSG.to_string(),
        };
        let found = discover_files(&config).unwrap();
        assert_eq!(found, vec![root.join("README.md"), root.join("docs/guide.md")]);
    }
}
