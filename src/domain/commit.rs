use chrono::{DateTime, FixedOffset};

/// Subject prefix of a release-marker commit
pub const RELEASE_MARKER: &str = "🚢 ";
/// Subject prefix of a breaking change
pub const BREAKING_MARKER: &str = "💥 ";
/// Subject prefix of a new feature
pub const FEATURE_MARKER: &str = "🎉 ";
/// Subject prefix of a bug fix
pub const FIX_MARKER: &str = "🐛 ";
/// Subject prefix of an internal change
pub const INTERNAL_MARKER: &str = "🌹 ";

/// A single entry of the local history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// First line of the commit message
    pub subject: String,
    /// Committer time, in the committer's own UTC offset
    pub timestamp: DateTime<FixedOffset>,
    /// Remainder of the commit message, may be empty
    pub body: String,
}

impl Commit {
    pub fn new(
        subject: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
        body: impl Into<String>,
    ) -> Self {
        Commit {
            subject: subject.into(),
            timestamp,
            body: body.into(),
        }
    }

    /// Classify this commit by its subject prefix
    pub fn kind(&self) -> ChangeKind {
        ChangeKind::classify(&self.subject)
    }

    /// Subject with its classification marker removed.
    ///
    /// Unclassified subjects are returned unchanged.
    pub fn title(&self) -> &str {
        self.kind()
            .marker()
            .and_then(|marker| self.subject.strip_prefix(marker))
            .unwrap_or(&self.subject)
    }
}

/// Category a commit falls into, decided by the emoji that starts its subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Release,
    Breaking,
    Feature,
    Fix,
    Internal,
    Unclassified,
}

impl ChangeKind {
    const PREFIXES: [(&'static str, ChangeKind); 5] = [
        (RELEASE_MARKER, ChangeKind::Release),
        (BREAKING_MARKER, ChangeKind::Breaking),
        (FEATURE_MARKER, ChangeKind::Feature),
        (FIX_MARKER, ChangeKind::Fix),
        (INTERNAL_MARKER, ChangeKind::Internal),
    ];

    /// Map a commit subject to its category.
    ///
    /// The markers are distinct literal prefixes, so at most one can match.
    pub fn classify(subject: &str) -> Self {
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| subject.starts_with(prefix))
            .map(|(_, kind)| *kind)
            .unwrap_or(ChangeKind::Unclassified)
    }

    /// The subject prefix identifying this category
    pub fn marker(self) -> Option<&'static str> {
        Self::PREFIXES
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(prefix, _)| *prefix)
    }
}
