//! Testing utilities for reconciler consumers.
//!
//! [`FakeLogSourceApi`] is an in-memory [`LogSourceApi`] that mimics the
//! management API closely enough for lifecycle tests: it assigns
//! identities, fills in server-side defaults for attributes left at
//! their zero values, versions an etag per source, and can be scripted
//! to fail upcoming calls with specific errors.
//!
//! # Example
//!
//! ```ignore
//! use logsource_provider::testing::FakeLogSourceApi;
//! use logsource_provider::{Reconciler, SourceError};
//!
//! #[tokio::test]
//! async fn test_create_retries() {
//!     let client = FakeLogSourceApi::new();
//!     client.fail_next_create(SourceError::TransientAuth("not yet".into()));
//!     let reconciler = Reconciler::new(client);
//!     // ...
//! }
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{Etag, LogSourceApi};
use crate::error::SourceError;
use crate::model::{CollectorId, RemoteLogSource, SourceId};

const FIRST_ID: i64 = 987;

/// In-memory fake of the remote log source API.
#[derive(Default)]
pub struct FakeLogSourceApi {
    sources: Mutex<HashMap<i64, RemoteLogSource>>,
    versions: Mutex<HashMap<i64, u64>>,
    next_id: AtomicI64,
    create_calls: AtomicU32,
    update_calls: AtomicU32,
    delete_calls: AtomicU32,
    create_failures: Mutex<VecDeque<SourceError>>,
    get_failures: Mutex<VecDeque<SourceError>>,
    update_failures: Mutex<VecDeque<SourceError>>,
    delete_failures: Mutex<VecDeque<SourceError>>,
    last_update_etag: Mutex<Option<String>>,
    id_reassignment: Mutex<Option<i64>>,
}

impl FakeLogSourceApi {
    /// Create an empty fake. The first assigned identity is 987.
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(FIRST_ID),
            ..Default::default()
        }
    }

    /// Script the next create call to fail with `err`.
    pub fn fail_next_create(&self, err: SourceError) {
        self.create_failures.lock().unwrap().push_back(err);
    }

    /// Script the next get call to fail with `err`.
    pub fn fail_next_get(&self, err: SourceError) {
        self.get_failures.lock().unwrap().push_back(err);
    }

    /// Script the next update call to fail with `err`.
    pub fn fail_next_update(&self, err: SourceError) {
        self.update_failures.lock().unwrap().push_back(err);
    }

    /// Script the next delete call to fail with `err`.
    pub fn fail_next_delete(&self, err: SourceError) {
        self.delete_failures.lock().unwrap().push_back(err);
    }

    /// Make the next successful update move the source to a new identity,
    /// as the server may do when an update relocates a source.
    pub fn reassign_id_on_update(&self, new_id: i64) {
        *self.id_reassignment.lock().unwrap() = Some(new_id);
    }

    /// How many create calls were made, including failed ones.
    pub fn create_calls(&self) -> u32 {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// How many update calls were made, including failed ones.
    pub fn update_calls(&self) -> u32 {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// How many delete calls were made, including failed ones.
    pub fn delete_calls(&self) -> u32 {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// The concurrency token the most recent update call carried.
    pub fn last_update_etag(&self) -> Option<String> {
        self.last_update_etag.lock().unwrap().clone()
    }

    /// Snapshot of a stored source, if present.
    pub fn stored(&self, id: SourceId) -> Option<RemoteLogSource> {
        self.sources.lock().unwrap().get(&id.0).cloned()
    }

    fn pop_failure(queue: &Mutex<VecDeque<SourceError>>) -> Option<SourceError> {
        queue.lock().unwrap().pop_front()
    }

    /// Server-side defaulting: attributes left at their zero value get a
    /// server-assigned value, which later reads surface to the caller.
    fn apply_server_defaults(source: &mut RemoteLogSource) {
        if source.time_zone.is_empty() {
            source.time_zone = "Etc/UTC".to_string();
        }
        if source.url.is_empty() {
            source.url = format!("https://collectors.example.com/v1/{}", source.id);
        }
    }

    fn etag_for(&self, id: i64) -> Etag {
        let versions = self.versions.lock().unwrap();
        format!("W/\"{}-{}\"", id, versions.get(&id).copied().unwrap_or(0))
    }

    fn bump_version(&self, id: i64) {
        *self.versions.lock().unwrap().entry(id).or_insert(0) += 1;
    }
}

#[async_trait]
impl LogSourceApi for FakeLogSourceApi {
    async fn create_source(
        &self,
        _collector: CollectorId,
        source: &RemoteLogSource,
    ) -> Result<RemoteLogSource, SourceError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = Self::pop_failure(&self.create_failures) {
            return Err(err);
        }

        let mut created = source.clone();
        created.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Self::apply_server_defaults(&mut created);
        self.sources.lock().unwrap().insert(created.id, created.clone());
        self.bump_version(created.id);
        Ok(created)
    }

    async fn get_source(
        &self,
        _collector: CollectorId,
        id: SourceId,
    ) -> Result<(RemoteLogSource, Etag), SourceError> {
        if let Some(err) = Self::pop_failure(&self.get_failures) {
            return Err(err);
        }

        let sources = self.sources.lock().unwrap();
        match sources.get(&id.0) {
            Some(source) => Ok((source.clone(), self.etag_for(id.0))),
            None => Err(SourceError::NotFound(format!("log source {}", id))),
        }
    }

    async fn update_source(
        &self,
        _collector: CollectorId,
        source: &RemoteLogSource,
        etag: &str,
    ) -> Result<RemoteLogSource, SourceError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_update_etag.lock().unwrap() = Some(etag.to_string());
        if let Some(err) = Self::pop_failure(&self.update_failures) {
            return Err(err);
        }

        let mut sources = self.sources.lock().unwrap();
        if !sources.contains_key(&source.id) {
            return Err(SourceError::NotFound(format!("log source {}", source.id)));
        }

        let mut updated = source.clone();
        let prior = sources.remove(&source.id).unwrap_or_default();
        if let Some(new_id) = self.id_reassignment.lock().unwrap().take() {
            updated.id = new_id;
        }
        // Full replacement, but server-owned computed values survive a
        // zero-valued overwrite.
        if updated.url.is_empty() {
            updated.url = prior.url;
        }
        Self::apply_server_defaults(&mut updated);
        sources.insert(updated.id, updated.clone());
        drop(sources);
        self.bump_version(updated.id);
        Ok(updated)
    }

    async fn delete_source(
        &self,
        _collector: CollectorId,
        id: SourceId,
    ) -> Result<(), SourceError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = Self::pop_failure(&self.delete_failures) {
            return Err(err);
        }

        match self.sources.lock().unwrap().remove(&id.0) {
            Some(_) => Ok(()),
            None => Err(SourceError::NotFound(format!("log source {}", id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RemoteBucketAuthentication, RemoteBucketPath, RemoteBucketResource, RemoteThirdPartyRef};

    const COLLECTOR: CollectorId = CollectorId(42);

    fn remote_source() -> RemoteLogSource {
        RemoteLogSource {
            name: "s3-logs".to_string(),
            source_type: "Polling".to_string(),
            scan_interval: 300_000,
            content_type: "AwsS3Bucket".to_string(),
            third_party_ref: RemoteThirdPartyRef {
                resources: vec![RemoteBucketResource {
                    service_type: "S3".to_string(),
                    path: RemoteBucketPath {
                        path_type: "S3BucketPathExpression".to_string(),
                        bucket_name: "acme-logs".to_string(),
                        path_expression: "*.log".to_string(),
                    },
                    authentication: RemoteBucketAuthentication {
                        auth_type: "RoleBased".to_string(),
                        role_arn: "arn:aws:iam::123:role/log-reader".to_string(),
                    },
                }],
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_defaults() {
        let api = FakeLogSourceApi::new();

        let created = api.create_source(COLLECTOR, &remote_source()).await.unwrap();

        assert_eq!(created.id, 987);
        assert_eq!(created.time_zone, "Etc/UTC");
        assert_eq!(created.url, "https://collectors.example.com/v1/987");

        let second = api.create_source(COLLECTOR, &remote_source()).await.unwrap();
        assert_eq!(second.id, 988);
    }

    #[tokio::test]
    async fn test_etag_changes_on_update() {
        let api = FakeLogSourceApi::new();
        let created = api.create_source(COLLECTOR, &remote_source()).await.unwrap();
        let (_, etag_before) = api.get_source(COLLECTOR, SourceId(created.id)).await.unwrap();

        api.update_source(COLLECTOR, &created, &etag_before)
            .await
            .unwrap();
        let (_, etag_after) = api.get_source(COLLECTOR, SourceId(created.id)).await.unwrap();

        assert_ne!(etag_before, etag_after);
    }

    #[tokio::test]
    async fn test_get_missing_source_is_not_found() {
        let api = FakeLogSourceApi::new();
        let err = api.get_source(COLLECTOR, SourceId(1)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_scripted_failures_fire_once() {
        let api = FakeLogSourceApi::new();
        api.fail_next_create(SourceError::TransientAuth("not yet".into()));

        let err = api
            .create_source(COLLECTOR, &remote_source())
            .await
            .unwrap_err();
        assert!(err.is_transient_auth());

        let created = api.create_source(COLLECTOR, &remote_source()).await.unwrap();
        assert_eq!(created.id, 987);
        assert_eq!(api.create_calls(), 2);
    }
}
