//! Comparing expected releases against the ones already published.

use std::collections::HashMap;

use crate::domain::release::{
    normalize_line_endings, NewRelease, ReleaseDraft, ReleaseUpdate, RemoteRelease,
};

/// How an expected release relates to the published ones
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseState {
    /// No published release carries the draft's tag
    Missing(NewRelease),
    /// A release with the tag exists but its name or body differs
    OutOfDate {
        current: RemoteRelease,
        update: ReleaseUpdate,
    },
    /// Name and body match exactly
    InSync,
}

impl ReleaseState {
    /// Classify a draft against the published release sharing its tag
    pub fn of(draft: &ReleaseDraft, current: Option<&RemoteRelease>) -> Self {
        let Some(current) = current else {
            return ReleaseState::Missing(NewRelease {
                tag: draft.tag.clone(),
                name: draft.name.clone(),
                body: draft.body.clone(),
            });
        };

        if current.name == draft.name && normalize_line_endings(&current.body) == draft.body {
            return ReleaseState::InSync;
        }

        ReleaseState::OutOfDate {
            current: current.clone(),
            update: ReleaseUpdate {
                id: current.id,
                name: draft.name.clone(),
                body: draft.body.clone(),
            },
        }
    }
}

/// A draft together with its reconciliation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRelease {
    pub draft: ReleaseDraft,
    pub state: ReleaseState,
}

/// Pair every expected draft, in order, with its state against `remote`.
///
/// When several published releases share a tag the first one listed wins.
pub fn reconcile(expected: &[ReleaseDraft], remote: &[RemoteRelease]) -> Vec<PlannedRelease> {
    let mut by_tag: HashMap<&str, &RemoteRelease> = HashMap::new();
    for release in remote {
        by_tag.entry(release.tag.as_str()).or_insert(release);
    }

    expected
        .iter()
        .map(|draft| PlannedRelease {
            draft: draft.clone(),
            state: ReleaseState::of(draft, by_tag.get(draft.tag.as_str()).copied()),
        })
        .collect()
}
