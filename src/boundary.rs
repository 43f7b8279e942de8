use std::fmt;

/// Warnings that occur while splitting the history into releases.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Commits newer than the latest release marker, not part of any release yet
    UnreleasedCommits { count: usize },
    /// A release marker for a version that was already seen further up the history
    DuplicateVersion { version: String },
    /// Version string is not a semantic version
    NonSemverVersion { version: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnreleasedCommits { count } => {
                let noun = if *count == 1 { "commit" } else { "commits" };
                write!(
                    f,
                    "{} {} since the latest release marker will not be published",
                    count, noun
                )
            }
            BoundaryWarning::DuplicateVersion { version } => {
                write!(
                    f,
                    "Version '{}' is released more than once, using the older release commit",
                    version
                )
            }
            BoundaryWarning::NonSemverVersion { version, reason } => {
                write!(f, "Version '{}' is not a semantic version: {}", version, reason)
            }
        }
    }
}
