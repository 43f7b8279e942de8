use std::collections::HashMap;

use crate::domain::Commit;
use crate::error::Result;
use crate::git::Repository;

/// Mock repository for testing without an actual git history
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    /// Newest first, as `list_commits` returns them
    commits: Vec<Commit>,
    remotes: HashMap<String, String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock repository with a newest-first history
    pub fn with_commits(commits: Vec<Commit>) -> Self {
        MockRepository {
            commits,
            remotes: HashMap::new(),
        }
    }

    /// Append a commit older than every commit added so far
    pub fn add_commit(&mut self, commit: Commit) {
        self.commits.push(commit);
    }

    /// Configure a remote URL
    pub fn add_remote(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.remotes.insert(name.into(), url.into());
    }
}

impl Repository for MockRepository {
    fn list_commits(&self) -> Result<Vec<Commit>> {
        Ok(self.commits.clone())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        Ok(self.remotes.get(remote).cloned())
    }
}
