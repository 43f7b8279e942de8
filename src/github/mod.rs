//! Release hosting abstraction
//!
//! [ReleaseApi] is what the sync loop talks to. [client::GitHubClient] speaks
//! the GitHub REST API, [mock::MockReleaseApi] records calls in memory.

pub mod client;
pub mod mock;

pub use client::GitHubClient;
pub use mock::{MockReleaseApi, RecordedCall};

use crate::domain::{NewRelease, ReleaseUpdate, RemoteRelease};
use crate::error::Result;
use crate::git::Upstream;

/// Operations on the releases of a hosted repository
///
/// Every call is a single blocking request. Failures are returned as-is,
/// there is no retry.
pub trait ReleaseApi {
    /// All published releases, bodies normalized to `\n` line endings
    fn list_releases(&self, upstream: &Upstream) -> Result<Vec<RemoteRelease>>;

    /// Publish a new release for an existing or new tag
    fn create_release(&self, upstream: &Upstream, release: &NewRelease) -> Result<()>;

    /// Replace the name and body of an existing release
    fn update_release(&self, upstream: &Upstream, update: &ReleaseUpdate) -> Result<()>;
}
