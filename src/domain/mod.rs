//! Domain logic - pure release rules independent of git and the hosting API

pub mod changeset;
pub mod commit;
pub mod notes;
pub mod release;

pub use changeset::{segment, Segmentation, VersionChangeSet};
pub use commit::{ChangeKind, Commit};
pub use notes::render;
pub use release::{
    expected_releases, normalize_line_endings, NewRelease, ReleaseDraft, ReleaseUpdate,
    RemoteRelease,
};
