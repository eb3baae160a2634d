//! The owner/repository pair that matched URLs are normalized toward.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{RelinkError, Result};

/// Environment variable GitHub Actions uses for the acting repository.
pub const GITHUB_REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";

/// Target identity of a rewrite run. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetIdentity {
    pub owner: String,
    pub repo: String,
}

impl TargetIdentity {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Parses an `owner/repo` slug.
    pub fn from_slug(slug: &str) -> Result<Self> {
        let trimmed = slug.trim();
        let mut parts = trimmed.split('/');
        let (Some(owner), Some(repo), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(RelinkError::InvalidIdentity(slug.to_string()));
        };
        if owner.is_empty() || repo.is_empty() {
            return Err(RelinkError::InvalidIdentity(slug.to_string()));
        }
        Ok(Self::new(owner, repo))
    }

    /// Reads the identity from `GITHUB_REPOSITORY`.
    pub fn from_env() -> Result<Self> {
        match std::env::var(GITHUB_REPOSITORY_ENV) {
            Ok(slug) if !slug.trim().is_empty() => Self::from_slug(&slug),
            _ => Err(RelinkError::MissingIdentity),
        }
    }

    /// The canonical repository URL, `https://github.com/<owner>/<repo>`.
    pub fn url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for TargetIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for TargetIdentity {
    type Err = RelinkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slug(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_repo() {
        let id = TargetIdentity::from_slug("bob/bar").unwrap();
        assert_eq!(id, TargetIdentity::new("bob", "bar"));
        assert_eq!(id.to_string(), "bob/bar");
        assert_eq!(id.url(), "https://github.com/bob/bar");
    }

    #[test]
    fn rejects_malformed_slugs() {
        for slug in ["bob", "bob/", "/bar", "bob/bar/baz", ""] {
            assert!(
                matches!(TargetIdentity::from_slug(slug), Err(RelinkError::InvalidIdentity(_))),
                "slug {slug:?} should be rejected"
            );
        }
    }
}
