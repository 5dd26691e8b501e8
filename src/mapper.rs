//! Conversion between declared state and the remote object model.
//!
//! The mapping is lossless in both directions over required and populated
//! optional fields. Unset optional/computed scalars are lowered to the
//! type's zero value on the way out; the server interprets a zero value
//! as "assign a default", and the assigned value flows back through
//! [`from_remote`] after every lifecycle operation.

use crate::error::SourceError;
use crate::model::{
    BucketAuthentication, BucketPath, BucketResource, DeclaredSource, RemoteBucketAuthentication,
    RemoteBucketPath, RemoteBucketResource, RemoteLogSource, RemoteThirdPartyRef, SourceId,
    ThirdPartyRef,
};

/// Build the full remote object from declared state.
///
/// Fails with a configuration error when the required `third_party_ref`
/// block is absent; the nested block is required for every remote write.
pub fn to_remote(
    declared: &DeclaredSource,
    id: Option<SourceId>,
) -> Result<RemoteLogSource, SourceError> {
    let bucket = declared
        .third_party_ref
        .as_ref()
        .map(|r| &r.resource)
        .ok_or_else(|| {
            SourceError::Configuration(
                "third_party_ref with one bucket resource is required".to_string(),
            )
        })?;

    Ok(RemoteLogSource {
        id: id.map(|id| id.0).unwrap_or_default(),
        name: declared.name.clone(),
        source_type: declared.source_type.clone(),
        scan_interval: declared.scan_interval,
        content_type: declared.content_type.clone(),
        description: declared.description.clone(),
        category: declared.category.clone(),
        time_zone: declared.timezone.clone().unwrap_or_default(),
        paused: declared.paused.unwrap_or_default(),
        cutoff_relative_time: declared.cutoff_relative_time.clone().unwrap_or_default(),
        multiline_processing_enabled: declared.multiline_processing_enabled.unwrap_or_default(),
        use_autoline_matching: declared.use_autoline_matching.unwrap_or_default(),
        manual_prefix_regexp: declared.manual_prefix_regexp.clone().unwrap_or_default(),
        url: declared.url.clone().unwrap_or_default(),
        third_party_ref: RemoteThirdPartyRef {
            resources: vec![RemoteBucketResource {
                service_type: bucket.service_type.clone(),
                path: RemoteBucketPath {
                    path_type: bucket.path.path_type.clone(),
                    bucket_name: bucket.path.bucket_name.clone(),
                    path_expression: bucket.path.path_expression.clone(),
                },
                authentication: RemoteBucketAuthentication {
                    auth_type: bucket.authentication.auth_type.clone(),
                    role_arn: bucket.authentication.role_arn.clone(),
                },
            }],
        },
    })
}

/// Map a remote object back into declared state.
///
/// Every scalar is copied back; optional/computed scalars come back
/// populated so that server-assigned defaults are visible to the caller.
/// The concurrency token is not part of the remote object and is never
/// mapped. Fails with a configuration error when the wire object carries
/// no bucket resource, since that data is required at a positional path.
pub fn from_remote(remote: &RemoteLogSource) -> Result<DeclaredSource, SourceError> {
    let bucket = remote.third_party_ref.resources.first().ok_or_else(|| {
        SourceError::Configuration(
            "remote log source carries no third-party bucket resource".to_string(),
        )
    })?;

    Ok(DeclaredSource {
        name: remote.name.clone(),
        source_type: remote.source_type.clone(),
        scan_interval: remote.scan_interval,
        content_type: remote.content_type.clone(),
        description: remote.description.clone(),
        category: remote.category.clone(),
        timezone: Some(remote.time_zone.clone()),
        paused: Some(remote.paused),
        cutoff_relative_time: Some(remote.cutoff_relative_time.clone()),
        multiline_processing_enabled: Some(remote.multiline_processing_enabled),
        use_autoline_matching: Some(remote.use_autoline_matching),
        manual_prefix_regexp: Some(remote.manual_prefix_regexp.clone()),
        url: Some(remote.url.clone()),
        third_party_ref: Some(ThirdPartyRef {
            resource: BucketResource {
                service_type: bucket.service_type.clone(),
                path: BucketPath {
                    path_type: bucket.path.path_type.clone(),
                    bucket_name: bucket.path.bucket_name.clone(),
                    path_expression: bucket.path.path_expression.clone(),
                },
                authentication: BucketAuthentication {
                    auth_type: bucket.authentication.auth_type.clone(),
                    role_arn: bucket.authentication.role_arn.clone(),
                },
            },
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::RemoteThirdPartyRef;

    fn declared_s3_source() -> DeclaredSource {
        DeclaredSource {
            name: "s3-logs".to_string(),
            source_type: "Polling".to_string(),
            scan_interval: 300_000,
            content_type: "AwsS3Bucket".to_string(),
            description: "prod access logs".to_string(),
            category: "prod/s3".to_string(),
            timezone: Some("Etc/UTC".to_string()),
            paused: Some(false),
            cutoff_relative_time: Some("-1d".to_string()),
            multiline_processing_enabled: Some(true),
            use_autoline_matching: Some(false),
            manual_prefix_regexp: Some("^\\d{4}".to_string()),
            url: Some("https://collectors.example.com/v1/987".to_string()),
            third_party_ref: Some(ThirdPartyRef {
                resource: BucketResource {
                    service_type: "S3".to_string(),
                    path: BucketPath {
                        path_type: "S3BucketPathExpression".to_string(),
                        bucket_name: "acme-logs".to_string(),
                        path_expression: "*.log".to_string(),
                    },
                    authentication: BucketAuthentication {
                        auth_type: "RoleBased".to_string(),
                        role_arn: "arn:aws:iam::123:role/log-reader".to_string(),
                    },
                },
            }),
        }
    }

    #[test]
    fn test_round_trip_is_exact_when_fully_populated() {
        let declared = declared_s3_source();
        let remote = to_remote(&declared, Some(SourceId(987))).unwrap();
        let back = from_remote(&remote).unwrap();
        assert_eq!(back, declared);
    }

    #[test]
    fn test_to_remote_copies_scalars_verbatim() {
        let declared = declared_s3_source();
        let remote = to_remote(&declared, None).unwrap();

        assert_eq!(remote.id, 0);
        assert_eq!(remote.name, "s3-logs");
        assert_eq!(remote.scan_interval, 300_000);
        assert_eq!(remote.content_type, "AwsS3Bucket");
        assert_eq!(remote.time_zone, "Etc/UTC");
        assert_eq!(remote.cutoff_relative_time, "-1d");

        let bucket = &remote.third_party_ref.resources[0];
        assert_eq!(bucket.service_type, "S3");
        assert_eq!(bucket.path.bucket_name, "acme-logs");
        assert_eq!(bucket.path.path_expression, "*.log");
        assert_eq!(bucket.authentication.role_arn, "arn:aws:iam::123:role/log-reader");
    }

    #[test]
    fn test_to_remote_sets_identity_when_given() {
        let remote = to_remote(&declared_s3_source(), Some(SourceId(987))).unwrap();
        assert_eq!(remote.id, 987);
    }

    #[test]
    fn test_to_remote_lowers_unset_optionals_to_zero_values() {
        let mut declared = declared_s3_source();
        declared.timezone = None;
        declared.paused = None;
        declared.url = None;

        let remote = to_remote(&declared, None).unwrap();
        assert_eq!(remote.time_zone, "");
        assert!(!remote.paused);
        assert_eq!(remote.url, "");
    }

    #[test]
    fn test_to_remote_fails_fast_without_bucket_reference() {
        let mut declared = declared_s3_source();
        declared.third_party_ref = None;

        let err = to_remote(&declared, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_from_remote_surfaces_server_assigned_defaults() {
        let mut remote = to_remote(&declared_s3_source(), Some(SourceId(987))).unwrap();
        remote.time_zone = "America/New_York".to_string();
        remote.paused = true;
        remote.url = "https://collectors.example.com/v1/987".to_string();

        let declared = from_remote(&remote).unwrap();
        assert_eq!(declared.timezone.as_deref(), Some("America/New_York"));
        assert_eq!(declared.paused, Some(true));
        assert_eq!(
            declared.url.as_deref(),
            Some("https://collectors.example.com/v1/987")
        );
    }

    #[test]
    fn test_from_remote_fails_fast_on_empty_resources() {
        let mut remote = to_remote(&declared_s3_source(), None).unwrap();
        remote.third_party_ref = RemoteThirdPartyRef { resources: vec![] };

        let err = from_remote(&remote).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
