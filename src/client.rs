//! The remote management API seam.
//!
//! The reconciler consumes this trait; the HTTP transport, auth headers,
//! and endpoint layout live in the host provider's client crate, not
//! here. Implementations must distinguish the not-found and
//! transient-auth conditions via the matching [`SourceError`] kinds,
//! since those two drive recreate signalling and retry.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::model::{CollectorId, RemoteLogSource, SourceId};

/// Opaque concurrency token returned by [`LogSourceApi::get_source`].
///
/// An empty token means "no token"; the server then applies the update
/// unconditionally.
pub type Etag = String;

/// Remote CRUD operations for log sources, scoped to a collector.
///
/// The handle is shared, stateless and reentrant; the reconciler relies
/// on the host to invoke at most one lifecycle operation per resource at
/// a time and does no locking of its own.
#[async_trait]
pub trait LogSourceApi: Send + Sync {
    /// Create a log source under the collector. The returned object
    /// carries the server-assigned identity.
    async fn create_source(
        &self,
        collector: CollectorId,
        source: &RemoteLogSource,
    ) -> Result<RemoteLogSource, SourceError>;

    /// Fetch a log source and its current concurrency token.
    ///
    /// Fails with [`SourceError::NotFound`] when the source is absent.
    async fn get_source(
        &self,
        collector: CollectorId,
        id: SourceId,
    ) -> Result<(RemoteLogSource, Etag), SourceError>;

    /// Replace a log source wholesale. The token detects concurrent
    /// out-of-band modification; an empty token skips the check.
    async fn update_source(
        &self,
        collector: CollectorId,
        source: &RemoteLogSource,
        etag: &str,
    ) -> Result<RemoteLogSource, SourceError>;

    /// Delete a log source.
    async fn delete_source(
        &self,
        collector: CollectorId,
        id: SourceId,
    ) -> Result<(), SourceError>;
}
