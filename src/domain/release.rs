use serde::Serialize;

use crate::boundary::BoundaryWarning;
use crate::domain::changeset::{segment, VersionChangeSet};
use crate::domain::commit::{Commit, RELEASE_MARKER};
use crate::domain::notes;

/// A release as it should exist on the hosting side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDraft {
    pub tag: String,
    pub name: String,
    pub body: String,
}

impl ReleaseDraft {
    /// Build the draft for a change-set: tag `v<version>`, name `🚢 <version> / <date>`
    pub fn from_changeset(changes: &VersionChangeSet) -> Self {
        ReleaseDraft {
            tag: format!("v{}", changes.version),
            name: format!("{}{} / {}", RELEASE_MARKER, changes.version, changes.date_string()),
            body: normalize_line_endings(&notes::render(changes)),
        }
    }
}

/// A release already published on the hosting side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRelease {
    pub id: u64,
    pub tag: String,
    pub name: String,
    pub body: String,
}

impl RemoteRelease {
    /// The body is normalized to `\n` line endings on construction.
    pub fn new(id: u64, tag: impl Into<String>, name: impl Into<String>, body: &str) -> Self {
        RemoteRelease {
            id,
            tag: tag.into(),
            name: name.into(),
            body: normalize_line_endings(body),
        }
    }
}

/// Payload for publishing a missing release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelease {
    #[serde(rename = "tag_name")]
    pub tag: String,
    pub name: String,
    pub body: String,
}

/// Payload for refreshing an out-of-date release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseUpdate {
    #[serde(skip)]
    pub id: u64,
    pub name: String,
    pub body: String,
}

/// Replace every CRLF with LF
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Expected releases for a newest-first history, most recent version first
pub fn expected_releases<I>(commits: I) -> (Vec<ReleaseDraft>, Vec<BoundaryWarning>)
where
    I: IntoIterator<Item = Commit>,
{
    let segmentation = segment(commits);
    let drafts = segmentation
        .changesets
        .iter()
        .map(ReleaseDraft::from_changeset)
        .collect();
    (drafts, segmentation.warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commit::fixtures::{at, commit};

    #[test]
    fn test_draft_naming() {
        let (drafts, warnings) = expected_releases(vec![
            Commit::new("🚢 1.0.0", at("2019-07-14T09:15:00+02:00"), ""),
            commit("🎉 Add initial implementation"),
        ]);

        assert!(warnings.is_empty());
        assert_eq!(
            drafts,
            vec![ReleaseDraft {
                tag: "v1.0.0".to_string(),
                name: "🚢 1.0.0 / 2019-07-14".to_string(),
                body: "## 🎉 Initial release\n".to_string(),
            }]
        );
    }

    #[test]
    fn test_draft_body_has_no_carriage_returns() {
        let (drafts, _) = expected_releases(vec![
            commit("🚢 2.0.0"),
            Commit::new(
                "💥 Change output",
                at("2020-01-01T00:00:00+00:00"),
                "Migration Guide:\r\nUpdate callers.\r\n",
            ),
        ]);
        assert!(!drafts[0].body.contains('\r'));
        assert!(drafts[0].body.contains("  Migration Guide:\n  Update callers."));
    }

    #[test]
    fn test_remote_release_normalizes_body() {
        let remote = RemoteRelease::new(7, "v1.0.0", "🚢 1.0.0 / 2020-01-01", "A\r\nB");
        assert_eq!(remote.body, "A\nB");
    }

    #[test]
    fn test_normalize_line_endings_leaves_lone_cr() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\rc\n");
    }

    #[test]
    fn test_payload_wire_names() {
        let create = NewRelease {
            tag: "v1.0.0".to_string(),
            name: "n".to_string(),
            body: "b".to_string(),
        };
        let json = serde_json::to_value(&create).unwrap();
        assert_eq!(json["tag_name"], "v1.0.0");

        let update = ReleaseUpdate {
            id: 42,
            name: "n".to_string(),
            body: "b".to_string(),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["name"], "n");
    }
}
