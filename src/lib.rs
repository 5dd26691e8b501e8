//! Log Source Provider
//!
//! This crate reconciles declared configuration for bucket-backed log
//! sources — ingestion points attached to a collector in a monitoring
//! platform — against their live state over the platform's management
//! API.
//!
//! # Overview
//!
//! Two layers compose the crate:
//!
//! - **Schema and mapping**: [`schema::log_source_schema`] describes the
//!   declared attribute surface; [`mapper`] converts losslessly between
//!   the typed declared form and the nested remote object model.
//! - **Reconciliation**: [`Reconciler`] drives create/read/update/delete
//!   against a [`LogSourceApi`] client, retrying the transient-auth
//!   error class with bounded backoff and handling the concurrency token
//!   on update.
//!
//! The remote API transport and the host framework's plumbing are
//! collaborators, not part of this crate: the client arrives through the
//! [`LogSourceApi`] trait, and the host dispatches one lifecycle
//! operation at a time per resource.
//!
//! # Quick Start
//!
//! ```ignore
//! use logsource_provider::{
//!     CollectorId, DeclaredSource, Reconciler,
//!     model::{BucketAuthentication, BucketPath, BucketResource, ThirdPartyRef},
//! };
//!
//! # async fn example(client: impl logsource_provider::LogSourceApi) {
//! let reconciler = Reconciler::new(client);
//!
//! let declared = DeclaredSource {
//!     name: "s3-logs".into(),
//!     source_type: "Polling".into(),
//!     scan_interval: 300_000,
//!     content_type: "AwsS3Bucket".into(),
//!     third_party_ref: Some(ThirdPartyRef {
//!         resource: BucketResource {
//!             service_type: "S3".into(),
//!             path: BucketPath {
//!                 path_type: "S3BucketPathExpression".into(),
//!                 bucket_name: "acme-logs".into(),
//!                 path_expression: "*.log".into(),
//!             },
//!             authentication: BucketAuthentication {
//!                 auth_type: "RoleBased".into(),
//!                 role_arn: "arn:aws:iam::123:role/log-reader".into(),
//!             },
//!         },
//!     }),
//!     ..Default::default()
//! };
//!
//! let (id, state) = reconciler.create(CollectorId(42), &declared).await.unwrap();
//! // `state` now carries server-assigned values for timezone, paused, url, ...
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return [`SourceError`]. Only the transient-auth class
//! is retried (identity propagation delay, bounded at two minutes); a
//! missing source on read is reported as `Ok(None)` rather than an
//! error, signalling that the resource must be recreated.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod reconciler;
pub mod retry;
pub mod schema;
pub mod testing;

// Re-export main types at crate root
pub use client::{Etag, LogSourceApi};
pub use error::{ErrorKind, SourceError};
pub use logging::{init_logging, try_init_logging};
pub use model::{CollectorId, DeclaredSource, RemoteLogSource, SourceId};
pub use reconciler::Reconciler;
pub use retry::{retry_with_backoff, TRANSIENT_AUTH_CEILING};
pub use schema::log_source_schema;

// Re-export async_trait for client implementations
pub use async_trait::async_trait;

// Re-export commonly used external types
pub use serde_json;
pub use tracing;
