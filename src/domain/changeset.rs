//! Splitting a newest-first history into per-version change-sets.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::boundary::BoundaryWarning;
use crate::domain::commit::{ChangeKind, Commit, RELEASE_MARKER};

/// Classified commits belonging to one released version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChangeSet {
    pub version: String,
    /// Calendar date of the release-marker commit
    pub date: NaiveDate,
    pub breaking: Vec<Commit>,
    pub features: Vec<Commit>,
    pub fixes: Vec<Commit>,
    pub internal: Vec<Commit>,
}

impl VersionChangeSet {
    pub fn new(version: impl Into<String>, date: NaiveDate) -> Self {
        VersionChangeSet {
            version: version.into(),
            date,
            breaking: Vec::new(),
            features: Vec::new(),
            fixes: Vec::new(),
            internal: Vec::new(),
        }
    }

    /// `YYYY-MM-DD` form of the release date
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.breaking.is_empty()
            && self.features.is_empty()
            && self.fixes.is_empty()
            && self.internal.is_empty()
    }

    /// Record a commit met while walking history newest-first.
    ///
    /// Commits are prepended so every list ends up oldest-first.
    /// Release markers and unclassified commits are ignored.
    pub fn push_front(&mut self, commit: Commit) {
        let list = match commit.kind() {
            ChangeKind::Breaking => &mut self.breaking,
            ChangeKind::Feature => &mut self.features,
            ChangeKind::Fix => &mut self.fixes,
            ChangeKind::Internal => &mut self.internal,
            ChangeKind::Release | ChangeKind::Unclassified => return,
        };
        list.insert(0, commit);
    }
}

/// Result of splitting a history into releases
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmentation {
    /// Change-sets in first-seen order, most recent release first
    pub changesets: Vec<VersionChangeSet>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Version carried by a release-marker subject, `None` for any other subject.
///
/// A leading `v` directly followed by a digit is dropped, so `🚢 v1.2.0` and
/// `🚢 1.2.0` name the same version.
pub fn release_version(subject: &str) -> Option<&str> {
    let rest = subject.strip_prefix(RELEASE_MARKER)?.trim();
    let version = match rest.strip_prefix('v') {
        Some(stripped) if stripped.starts_with(|c: char| c.is_ascii_digit()) => stripped,
        _ => rest,
    };
    Some(version)
}

/// Split commits, supplied newest-first, into per-version change-sets.
///
/// Each release marker opens a change-set that collects the older commits
/// following it until the next marker. Commits above the newest marker are
/// skipped. A repeated version keeps its first position but its contents are
/// replaced, as with an insertion-ordered map.
pub fn segment<I>(commits: I) -> Segmentation
where
    I: IntoIterator<Item = Commit>,
{
    let mut changesets: Vec<VersionChangeSet> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut warnings = Vec::new();
    let mut current: Option<usize> = None;
    let mut unreleased = 0usize;

    for commit in commits {
        if let Some(version) = release_version(&commit.subject) {
            let changeset = VersionChangeSet::new(version, commit.timestamp.date_naive());

            if let Err(e) = semver::Version::parse(version) {
                warnings.push(BoundaryWarning::NonSemverVersion {
                    version: version.to_string(),
                    reason: e.to_string(),
                });
            }

            let slot = match index.get(version) {
                Some(&slot) => {
                    warnings.push(BoundaryWarning::DuplicateVersion {
                        version: version.to_string(),
                    });
                    changesets[slot] = changeset;
                    slot
                }
                None => {
                    changesets.push(changeset);
                    index.insert(version.to_string(), changesets.len() - 1);
                    changesets.len() - 1
                }
            };

            debug!(version, date = %changesets[slot].date_string(), "release marker");
            current = Some(slot);
            continue;
        }

        match current {
            Some(slot) => changesets[slot].push_front(commit),
            None => unreleased += 1,
        }
    }

    if unreleased > 0 {
        warnings.insert(0, BoundaryWarning::UnreleasedCommits { count: unreleased });
    }

    Segmentation {
        changesets,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commit::fixtures::{at, commit};

    fn dated(subject: &str, rfc3339: &str) -> Commit {
        Commit::new(subject, at(rfc3339), "")
    }

    fn subjects(list: &[Commit]) -> Vec<&str> {
        list.iter().map(|c| c.subject.as_str()).collect()
    }

    #[test]
    fn test_release_version_extraction() {
        assert_eq!(release_version("🚢 1.2.0"), Some("1.2.0"));
        assert_eq!(release_version("🚢 v1.2.0"), Some("1.2.0"));
        assert_eq!(release_version("🚢 very-first"), Some("very-first"));
        assert_eq!(release_version("🎉 1.2.0"), None);
        assert_eq!(release_version("1.2.0"), None);
    }

    #[test]
    fn test_single_initial_release() {
        let result = segment(vec![
            dated("🚢 1.0.0", "2019-03-04T10:00:00+01:00"),
            commit("🎉 Add initial implementation"),
        ]);

        assert_eq!(result.changesets.len(), 1);
        let set = &result.changesets[0];
        assert_eq!(set.version, "1.0.0");
        assert_eq!(set.date_string(), "2019-03-04");
        assert_eq!(subjects(&set.features), vec!["🎉 Add initial implementation"]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_versions_in_first_seen_order() {
        let result = segment(vec![
            commit("🚢 2.0.0"),
            commit("🐛 Fix crash"),
            commit("🎉 Add widget"),
            commit("🚢 1.0.0"),
            commit("🎉 Add initial implementation"),
        ]);

        let versions: Vec<&str> = result
            .changesets
            .iter()
            .map(|s| s.version.as_str())
            .collect();
        assert_eq!(versions, vec!["2.0.0", "1.0.0"]);

        let latest = &result.changesets[0];
        assert_eq!(subjects(&latest.fixes), vec!["🐛 Fix crash"]);
        assert_eq!(subjects(&latest.features), vec!["🎉 Add widget"]);
    }

    #[test]
    fn test_category_lists_are_chronological() {
        let result = segment(vec![
            commit("🚢 1.1.0"),
            commit("🎉 Third"),
            commit("🐛 Only fix"),
            commit("🎉 Second"),
            commit("🎉 First"),
        ]);

        let set = &result.changesets[0];
        assert_eq!(
            subjects(&set.features),
            vec!["🎉 First", "🎉 Second", "🎉 Third"]
        );
    }

    #[test]
    fn test_every_commit_lands_in_at_most_one_list() {
        let history = vec![
            commit("🚢 1.0.0"),
            commit("💥 Break"),
            commit("🎉 Feature"),
            commit("🐛 Fix"),
            commit("🌹 Chore"),
            commit("Unmarked"),
        ];
        let result = segment(history);
        let set = &result.changesets[0];

        let total = set.breaking.len() + set.features.len() + set.fixes.len() + set.internal.len();
        assert_eq!(total, 4);
        assert_eq!(subjects(&set.breaking), vec!["💥 Break"]);
        assert_eq!(subjects(&set.internal), vec!["🌹 Chore"]);
    }

    #[test]
    fn test_commits_before_first_marker_are_skipped() {
        let result = segment(vec![
            commit("🎉 Not released yet"),
            commit("🐛 Neither"),
            commit("🚢 1.0.0"),
            commit("🎉 Add initial implementation"),
        ]);

        assert_eq!(result.changesets.len(), 1);
        assert_eq!(result.changesets[0].features.len(), 1);
        assert_eq!(
            result.warnings,
            vec![BoundaryWarning::UnreleasedCommits { count: 2 }]
        );
    }

    #[test]
    fn test_empty_history() {
        let result = segment(Vec::new());
        assert!(result.changesets.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_release_without_changes() {
        let result = segment(vec![commit("🚢 1.0.1"), commit("🚢 1.0.0")]);
        assert_eq!(result.changesets.len(), 2);
        assert!(result.changesets[0].is_empty());
    }

    #[test]
    fn test_duplicate_version_keeps_position_and_resets_contents() {
        let result = segment(vec![
            commit("🚢 1.0.0"),
            commit("🎉 Lost"),
            commit("🚢 0.9.0"),
            dated("🚢 1.0.0", "2018-05-06T08:00:00+00:00"),
            commit("🐛 Kept"),
        ]);

        let versions: Vec<&str> = result
            .changesets
            .iter()
            .map(|s| s.version.as_str())
            .collect();
        assert_eq!(versions, vec!["1.0.0", "0.9.0"]);

        let first = &result.changesets[0];
        assert_eq!(first.date_string(), "2018-05-06");
        assert!(first.features.is_empty());
        assert_eq!(subjects(&first.fixes), vec!["🐛 Kept"]);
        assert!(result
            .warnings
            .contains(&BoundaryWarning::DuplicateVersion {
                version: "1.0.0".to_string()
            }));
    }

    #[test]
    fn test_non_semver_version_is_kept_with_warning() {
        let result = segment(vec![commit("🚢 2020.1"), commit("🐛 Fix")]);
        assert_eq!(result.changesets[0].version, "2020.1");
        assert!(matches!(
            result.warnings.as_slice(),
            [BoundaryWarning::NonSemverVersion { version, .. }] if version == "2020.1"
        ));
    }

    #[test]
    fn test_date_uses_committer_offset() {
        let result = segment(vec![dated("🚢 1.0.0", "2021-12-31T23:30:00-05:00")]);
        assert_eq!(result.changesets[0].date_string(), "2021-12-31");
    }
}
