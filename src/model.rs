//! Declared and remote data types for the bucket-backed log source.
//!
//! [`DeclaredSource`] is the typed form of the caller's configuration.
//! Optional/computed attributes are `Option` so that "left unset, accept
//! the server's value" is distinguishable from an explicit setting. The
//! `Remote*` structs mirror the management API's nested JSON object and
//! are what actually goes over the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the collector a log source is attached to.
///
/// Supplied by the caller on every remote call; the collector itself is
/// not managed by this resource's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectorId(pub i64);

/// Server-assigned identifier of a log source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId(pub i64);

impl fmt::Display for CollectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The desired state of a log source, as declared by the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeclaredSource {
    /// Display name of the source.
    pub name: String,
    /// Source kind, e.g. `"Polling"`.
    pub source_type: String,
    /// Bucket scan interval in milliseconds.
    pub scan_interval: i64,
    /// Content kind, e.g. `"AwsS3Bucket"`.
    pub content_type: String,
    /// Free-form description. Defaults to empty.
    pub description: String,
    /// Source category. Defaults to empty.
    pub category: String,
    /// Timezone applied to ingested timestamps. Server-inferred when unset.
    pub timezone: Option<String>,
    /// Whether ingestion is paused. Server-defaulted when unset.
    pub paused: Option<bool>,
    /// Only collect data more recent than this relative time.
    pub cutoff_relative_time: Option<String>,
    /// Whether multiline message processing is enabled.
    pub multiline_processing_enabled: Option<bool>,
    /// Whether message boundaries are inferred automatically.
    pub use_autoline_matching: Option<bool>,
    /// Manual message-prefix boundary regex.
    pub manual_prefix_regexp: Option<String>,
    /// Server-assigned ingestion URL. Always computed.
    pub url: Option<String>,
    /// The bucket this source reads from. Required for creation.
    pub third_party_ref: Option<ThirdPartyRef>,
}

/// Reference to the third-party bucket a source ingests from.
///
/// The declared schema represents this as three levels of length-one
/// lists; in typed form it is a single nested value.
#[derive(Debug, Clone, PartialEq)]
pub struct ThirdPartyRef {
    /// The single bucket resource entry.
    pub resource: BucketResource,
}

/// A bucket the source reads, with its path and authentication.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketResource {
    /// Backing service, e.g. `"S3"`.
    pub service_type: String,
    /// Where in the bucket to read.
    pub path: BucketPath,
    /// How to authenticate against the bucket.
    pub authentication: BucketAuthentication,
}

/// Path selection inside a bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketPath {
    /// Path kind, e.g. `"S3BucketPathExpression"`.
    pub path_type: String,
    /// Bucket name.
    pub bucket_name: String,
    /// Object key pattern, e.g. `"*.log"`.
    pub path_expression: String,
}

/// Authentication material for bucket access.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketAuthentication {
    /// Auth kind, e.g. `"RoleBased"`.
    pub auth_type: String,
    /// IAM role granting read access.
    pub role_arn: String,
}

/// Wire representation of a log source as the management API sees it.
///
/// `id` is zero until the server assigns one. The concurrency token
/// (etag) travels alongside this struct, never inside it. Fields mirror
/// [`DeclaredSource`] one-to-one.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLogSource {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub source_type: String,
    pub scan_interval: i64,
    pub content_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "timeZone", default)]
    pub time_zone: String,
    #[serde(default)]
    pub paused: bool,
    #[serde(default)]
    pub cutoff_relative_time: String,
    #[serde(default)]
    pub multiline_processing_enabled: bool,
    #[serde(default)]
    pub use_autoline_matching: bool,
    #[serde(default)]
    pub manual_prefix_regexp: String,
    #[serde(default)]
    pub url: String,
    pub third_party_ref: RemoteThirdPartyRef,
}

/// Wire form of the third-party reference: a list capped at one entry.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteThirdPartyRef {
    pub resources: Vec<RemoteBucketResource>,
}

/// Wire form of a bucket resource.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBucketResource {
    pub service_type: String,
    pub path: RemoteBucketPath,
    pub authentication: RemoteBucketAuthentication,
}

/// Wire form of a bucket path.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBucketPath {
    #[serde(rename = "type")]
    pub path_type: String,
    pub bucket_name: String,
    pub path_expression: String,
}

/// Wire form of bucket authentication.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteBucketAuthentication {
    #[serde(rename = "type")]
    pub auth_type: String,
    #[serde(rename = "roleARN")]
    pub role_arn: String,
}
