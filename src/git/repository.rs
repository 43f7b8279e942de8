use std::path::Path;

use chrono::{DateTime, FixedOffset};
use git2::{ErrorCode, Sort};
use tracing::debug;

use crate::domain::Commit;
use crate::error::Result;
use crate::git::Repository;

/// Real repository backed by `git2`
pub struct Git2Repository {
    repo: git2::Repository,
}

impl Git2Repository {
    /// Discover the repository containing the current working directory
    pub fn discover() -> Result<Self> {
        Self::open(".")
    }

    /// Discover the repository containing `path` (or one of its parents)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let repo = git2::Repository::discover(path)?;
        Ok(Git2Repository { repo })
    }
}

impl Repository for Git2Repository {
    fn list_commits(&self) -> Result<Vec<Commit>> {
        let mut revwalk = self.repo.revwalk()?;
        match revwalk.push_head() {
            Ok(()) => {}
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                debug!("repository has no commits yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        }
        // Children before parents even when committer times tie
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;

            // Same history as `git log --no-merges`
            if commit.parent_count() > 1 {
                continue;
            }

            match to_record(&commit) {
                Some(record) => commits.push(record),
                None => debug!(id = %commit.id(), "skipping unreadable commit"),
            }
        }

        debug!(count = commits.len(), "read local history");
        Ok(commits)
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        match self.repo.find_remote(remote) {
            Ok(found) => Ok(found.url().map(str::to_string)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Convert a git2 commit into a history record, `None` when it has no
/// readable subject.
fn to_record(commit: &git2::Commit<'_>) -> Option<Commit> {
    let subject = commit.summary()?.trim();
    if subject.is_empty() {
        return None;
    }

    let body = commit.body().unwrap_or_default().trim_end();
    let timestamp = committer_time(&commit.committer().when())?;

    Some(Commit::new(subject, timestamp, body))
}

/// Committer time in the committer's own offset, matching `%cI`
fn committer_time(when: &git2::Time) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(when.offset_minutes() * 60)?;
    let utc = DateTime::from_timestamp(when.seconds(), 0)?;
    Some(utc.with_timezone(&offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Signature, Time};
    use tempfile::TempDir;

    fn commit_at(repo: &git2::Repository, message: &str, seconds: i64) -> git2::Oid {
        let sig = Signature::new("Test", "test@example.com", &Time::new(seconds, 120)).unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents: Vec<git2::Commit<'_>> = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    #[test]
    fn test_empty_repository_has_no_commits() {
        let dir = TempDir::new().unwrap();
        git2::Repository::init(dir.path()).unwrap();

        let repo = Git2Repository::open(dir.path()).unwrap();
        assert!(repo.list_commits().unwrap().is_empty());
    }

    #[test]
    fn test_list_commits_newest_first_with_body() {
        let dir = TempDir::new().unwrap();
        let raw = git2::Repository::init(dir.path()).unwrap();
        commit_at(&raw, "🎉 Add initial implementation\n", 1_600_000_000);
        commit_at(
            &raw,
            "💥 Rename option\n\nMigration Guide:\nUse the new name.\n",
            1_600_086_400,
        );

        let repo = Git2Repository::open(dir.path()).unwrap();
        let commits = repo.list_commits().unwrap();

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].subject, "💥 Rename option");
        assert_eq!(commits[0].body, "Migration Guide:\nUse the new name.");
        assert_eq!(commits[1].subject, "🎉 Add initial implementation");
        assert_eq!(commits[1].body, "");
        assert_eq!(commits[1].timestamp.offset().local_minus_utc(), 7200);
    }

    #[test]
    fn test_remote_url_lookup() {
        let dir = TempDir::new().unwrap();
        let raw = git2::Repository::init(dir.path()).unwrap();
        raw.remote("origin", "git@github.com:octo/hello.git").unwrap();

        let repo = Git2Repository::open(dir.path()).unwrap();
        assert_eq!(
            repo.remote_url("origin").unwrap().as_deref(),
            Some("git@github.com:octo/hello.git")
        );
        assert_eq!(repo.remote_url("upstream").unwrap(), None);
    }

    #[test]
    fn test_committer_time_keeps_offset() {
        let time = git2::Time::new(1_609_459_200, -300);
        let converted = committer_time(&time).unwrap();
        assert_eq!(converted.to_rfc3339(), "2020-12-31T19:00:00-05:00");
    }
}
