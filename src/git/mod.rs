//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the local history,
//! allowing the release pipeline to run against a real repository or an
//! in-memory one in tests.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! The upstream GitHub repository is derived from a remote URL through
//! [Upstream::from_remote_url].

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::Commit;
use crate::error::{ReleaseSyncError, Result};

/// Source of the local commit history
///
/// ## Error Handling
///
/// Implementations map underlying errors (like `git2::Error`) to
/// [crate::error::ReleaseSyncError]. History entries that cannot be read as a
/// commit record are skipped rather than reported.
pub trait Repository {
    /// List commits reachable from HEAD, newest first, excluding merges
    ///
    /// # Returns
    /// * `Ok(Vec<Commit>)` - Commits in reverse-chronological order
    /// * `Err` - If the history cannot be walked
    fn list_commits(&self) -> Result<Vec<Commit>>;

    /// URL of a configured remote
    ///
    /// # Returns
    /// * `Ok(Some(url))` - The remote exists and has a URL
    /// * `Ok(None)` - No such remote
    /// * `Err` - If there's a Git error
    fn remote_url(&self, remote: &str) -> Result<Option<String>>;
}

/// GitHub repository the releases belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    pub owner: String,
    pub repo: String,
}

fn remote_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[/:]([\w-]+)/(.*?)(?:\.git)?$").expect("static regex is valid"))
}

impl Upstream {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Upstream {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Extract `owner/repo` from an HTTPS, SSH or scp-style remote URL
    ///
    /// # Examples
    /// ```
    /// # use emoji_github_releases::git::Upstream;
    /// let upstream = Upstream::from_remote_url("git@github.com:octo/hello.git").unwrap();
    /// assert_eq!(upstream, Upstream::new("octo", "hello"));
    /// ```
    pub fn from_remote_url(url: &str) -> Result<Self> {
        let url = url.trim();
        let captures = remote_url_regex()
            .captures(url)
            .ok_or_else(|| ReleaseSyncError::upstream(format!("unrecognized remote URL '{}'", url)))?;

        let owner = &captures[1];
        let repo = &captures[2];
        if repo.is_empty() {
            return Err(ReleaseSyncError::upstream(format!(
                "remote URL '{}' has no repository name",
                url
            )));
        }

        Ok(Upstream::new(owner, repo))
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Resolve the upstream repository from the URL of `remote`
pub fn resolve_upstream<R: Repository + ?Sized>(repo: &R, remote: &str) -> Result<Upstream> {
    let url = repo
        .remote_url(remote)?
        .ok_or_else(|| ReleaseSyncError::upstream(format!("no remote named '{}'", remote)))?;
    Upstream::from_remote_url(&url)
}
