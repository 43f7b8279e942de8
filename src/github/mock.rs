use std::sync::Mutex;

use crate::domain::{NewRelease, ReleaseUpdate, RemoteRelease};
use crate::error::{ReleaseSyncError, Result};
use crate::git::Upstream;
use crate::github::ReleaseApi;

/// A write issued against [MockReleaseApi]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Create(Upstream, NewRelease),
    Update(Upstream, ReleaseUpdate),
}

/// In-memory release host that records every create/update call
#[derive(Debug, Default)]
pub struct MockReleaseApi {
    releases: Vec<RemoteRelease>,
    calls: Mutex<Vec<RecordedCall>>,
    fail_with_status: Option<u16>,
}

impl MockReleaseApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host that already publishes `releases`
    pub fn with_releases(releases: Vec<RemoteRelease>) -> Self {
        MockReleaseApi {
            releases,
            ..Self::default()
        }
    }

    /// Make every call fail with the given HTTP status
    pub fn failing(status: u16) -> Self {
        MockReleaseApi {
            fail_with_status: Some(status),
            ..Self::default()
        }
    }

    /// Writes issued so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn check(&self) -> Result<()> {
        match self.fail_with_status {
            Some(401) => Err(ReleaseSyncError::api(401, "Bad credentials")),
            Some(status) => Err(ReleaseSyncError::api(status, "mock failure")),
            None => Ok(()),
        }
    }

    fn record(&self, call: RecordedCall) -> Result<()> {
        self.calls
            .lock()
            .map_err(|_| ReleaseSyncError::config("mock call log poisoned"))?
            .push(call);
        Ok(())
    }
}

impl ReleaseApi for MockReleaseApi {
    fn list_releases(&self, _upstream: &Upstream) -> Result<Vec<RemoteRelease>> {
        self.check()?;
        Ok(self.releases.clone())
    }

    fn create_release(&self, upstream: &Upstream, release: &NewRelease) -> Result<()> {
        self.check()?;
        self.record(RecordedCall::Create(upstream.clone(), release.clone()))
    }

    fn update_release(&self, upstream: &Upstream, update: &ReleaseUpdate) -> Result<()> {
        self.check()?;
        self.record(RecordedCall::Update(upstream.clone(), update.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_writes_in_order() {
        let api = MockReleaseApi::new();
        let upstream = Upstream::new("octo", "hello");
        let create = NewRelease {
            tag: "v1.0.0".to_string(),
            name: "one".to_string(),
            body: "a".to_string(),
        };
        let update = ReleaseUpdate {
            id: 3,
            name: "two".to_string(),
            body: "b".to_string(),
        };

        api.create_release(&upstream, &create).unwrap();
        api.update_release(&upstream, &update).unwrap();

        assert_eq!(
            api.calls(),
            vec![
                RecordedCall::Create(upstream.clone(), create),
                RecordedCall::Update(upstream, update),
            ]
        );
    }

    #[test]
    fn test_failing_mock_rejects_credentials() {
        let api = MockReleaseApi::failing(401);
        let err = api
            .list_releases(&Upstream::new("octo", "hello"))
            .unwrap_err();
        assert!(err.is_auth_failure());
    }
}
