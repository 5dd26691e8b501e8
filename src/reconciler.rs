//! Lifecycle operations for the bucket-backed log source.
//!
//! The host framework invokes one operation at a time per resource with
//! the declared state and the persisted identity; each operation runs to
//! completion, including its internal retry loop, before the next is
//! dispatched. Errors bubble to the host unchanged; the host owns
//! user-visible reporting.

use tracing::{debug, instrument};

use crate::client::LogSourceApi;
use crate::error::SourceError;
use crate::mapper::{from_remote, to_remote};
use crate::model::{CollectorId, DeclaredSource, SourceId};
use crate::retry::{is_transient_auth, retry_with_backoff, TRANSIENT_AUTH_CEILING};

/// Reconciles declared log source state against the remote API.
///
/// Generic over the [`LogSourceApi`] implementation so the host can
/// inject its HTTP client, and tests a fake.
pub struct Reconciler<C> {
    client: C,
}

impl<C: LogSourceApi> Reconciler<C> {
    /// Create a reconciler over the given remote client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Access the underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Create the log source under the collector.
    ///
    /// The remote create is retried on transient auth failures up to the
    /// ceiling. After the server assigns an identity, a full update pass
    /// runs as the read-after-write step, so optional attributes the
    /// caller left unset come back populated with server-assigned
    /// values. Create and update therefore converge on identical final
    /// state.
    #[instrument(skip(self, declared), fields(collector = %collector, name = %declared.name))]
    pub async fn create(
        &self,
        collector: CollectorId,
        declared: &DeclaredSource,
    ) -> Result<(SourceId, DeclaredSource), SourceError> {
        let payload = to_remote(declared, None)?;

        let client = &self.client;
        let payload_ref = &payload;
        let created = retry_with_backoff(TRANSIENT_AUTH_CEILING, is_transient_auth, move || {
            async move { client.create_source(collector, payload_ref).await }
        })
        .await?;

        let id = SourceId(created.id);
        debug!(%id, "log source created, syncing server-assigned attributes");
        self.update(collector, id, declared).await
    }

    /// Fetch the current remote state of the log source.
    ///
    /// Returns `Ok(None)` when the remote reports the source absent: the
    /// source was deleted out of band and the caller should clear the
    /// identity and recreate. Not retried; absence is a legitimate state.
    #[instrument(skip(self), fields(collector = %collector, id = %id))]
    pub async fn read(
        &self,
        collector: CollectorId,
        id: SourceId,
    ) -> Result<Option<DeclaredSource>, SourceError> {
        match self.client.get_source(collector, id).await {
            Ok((remote, _etag)) => Ok(Some(from_remote(&remote)?)),
            Err(err) if err.is_not_found() => {
                debug!(%id, "log source gone upstream, needs recreation");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Replace the remote log source with the declared state.
    ///
    /// The update is a full overwrite, not a partial patch. The current
    /// concurrency token is fetched first; a failed fetch degrades to an
    /// empty token rather than aborting, so the concurrency check is
    /// best-effort. The remote update is retried on transient auth
    /// failures, the identity from the response is adopted, and a final
    /// read returns fully server-synchronized state.
    #[instrument(skip(self, declared), fields(collector = %collector, id = %id))]
    pub async fn update(
        &self,
        collector: CollectorId,
        id: SourceId,
        declared: &DeclaredSource,
    ) -> Result<(SourceId, DeclaredSource), SourceError> {
        let payload = to_remote(declared, Some(id))?;

        let etag = match self.client.get_source(collector, id).await {
            Ok((_, etag)) => etag,
            Err(err) => {
                debug!(%err, "concurrency token fetch failed, updating without token");
                String::new()
            }
        };

        let client = &self.client;
        let payload_ref = &payload;
        let etag_ref = etag.as_str();
        let updated = retry_with_backoff(TRANSIENT_AUTH_CEILING, is_transient_auth, move || {
            async move { client.update_source(collector, payload_ref, etag_ref).await }
        })
        .await?;

        let id = SourceId(updated.id);
        match self.read(collector, id).await? {
            Some(synced) => Ok((id, synced)),
            None => Err(SourceError::NotFound(format!(
                "log source {} vanished after update",
                id
            ))),
        }
    }

    /// Delete the log source.
    ///
    /// Not retried; delete failures are assumed non-transient. On
    /// success the caller clears the persisted identity.
    #[instrument(skip(self), fields(collector = %collector, id = %id))]
    pub async fn delete(&self, collector: CollectorId, id: SourceId) -> Result<(), SourceError> {
        self.client.delete_source(collector, id).await
    }
}
