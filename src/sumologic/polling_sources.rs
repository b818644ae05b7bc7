//! Polling Sources
//!
//! Sources that periodically scan an AWS location (S3 buckets, CloudWatch
//! metrics, AWS inventory) instead of receiving pushed data.

use super::client::SumoClient;
use super::sources::{extract_id, source_path, Source};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Kind of data a polling source collects
///
/// Configuration only accepts the known kinds. Kinds the API reports that
/// this crate does not know are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    AwsS3Bucket,
    AwsElbBucket,
    AwsCloudFrontBucket,
    AwsCloudTrailBucket,
    AwsS3AuditBucket,
    AwsCloudWatch,
    AwsInventory,
    Other(String),
}

impl ContentType {
    /// Every accepted name, in schema order
    pub const NAMES: &'static [&'static str] = &[
        "AwsS3Bucket",
        "AwsElbBucket",
        "AwsCloudFrontBucket",
        "AwsCloudTrailBucket",
        "AwsS3AuditBucket",
        "AwsCloudWatch",
        "AwsInventory",
    ];

    /// Parse a known kind; `None` for anything else
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "AwsS3Bucket" => Some(Self::AwsS3Bucket),
            "AwsElbBucket" => Some(Self::AwsElbBucket),
            "AwsCloudFrontBucket" => Some(Self::AwsCloudFrontBucket),
            "AwsCloudTrailBucket" => Some(Self::AwsCloudTrailBucket),
            "AwsS3AuditBucket" => Some(Self::AwsS3AuditBucket),
            "AwsCloudWatch" => Some(Self::AwsCloudWatch),
            "AwsInventory" => Some(Self::AwsInventory),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::AwsS3Bucket => "AwsS3Bucket",
            Self::AwsElbBucket => "AwsElbBucket",
            Self::AwsCloudFrontBucket => "AwsCloudFrontBucket",
            Self::AwsCloudTrailBucket => "AwsCloudTrailBucket",
            Self::AwsS3AuditBucket => "AwsS3AuditBucket",
            Self::AwsCloudWatch => "AwsCloudWatch",
            Self::AwsInventory => "AwsInventory",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ContentType {
    fn from(name: String) -> Self {
        Self::from_name(&name).unwrap_or(Self::Other(name))
    }
}

impl From<ContentType> for String {
    fn from(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// How Sumo Logic authenticates against AWS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PollingAuthentication {
    #[serde(rename = "S3BucketAuthentication")]
    S3Bucket {
        #[serde(rename = "awsId", default, deserialize_with = "super::null_as_default")]
        access_key: String,
        #[serde(rename = "awsKey", default, deserialize_with = "super::null_as_default")]
        secret_key: String,
    },
    #[serde(rename = "AWSRoleBasedAuthentication")]
    RoleBased {
        #[serde(rename = "roleARN", default, deserialize_with = "super::null_as_default")]
        role_arn: String,
    },
}

impl PollingAuthentication {
    pub const S3_BUCKET: &'static str = "S3BucketAuthentication";
    pub const ROLE_BASED: &'static str = "AWSRoleBasedAuthentication";

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::S3Bucket { .. } => Self::S3_BUCKET,
            Self::RoleBased { .. } => Self::ROLE_BASED,
        }
    }
}

/// CloudWatch tag filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    #[serde(rename = "type", default, deserialize_with = "super::null_as_default")]
    pub filter_type: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub namespace: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub tags: Vec<String>,
}

/// Where the source looks for data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PollingPath {
    #[serde(rename = "S3BucketPathExpression", rename_all = "camelCase")]
    S3Bucket {
        #[serde(default, deserialize_with = "super::null_as_default")]
        bucket_name: String,
        #[serde(default, deserialize_with = "super::null_as_default")]
        path_expression: String,
    },
    #[serde(rename = "CloudWatchPath", rename_all = "camelCase")]
    CloudWatch {
        #[serde(
            default,
            deserialize_with = "super::null_as_default",
            skip_serializing_if = "Vec::is_empty"
        )]
        limit_to_regions: Vec<String>,
        #[serde(
            default,
            deserialize_with = "super::null_as_default",
            skip_serializing_if = "Vec::is_empty"
        )]
        limit_to_namespaces: Vec<String>,
        #[serde(
            default,
            deserialize_with = "super::null_as_default",
            skip_serializing_if = "Vec::is_empty"
        )]
        tag_filters: Vec<TagFilter>,
    },
    #[serde(rename = "AwsInventoryPath", rename_all = "camelCase")]
    AwsInventory {
        #[serde(
            default,
            deserialize_with = "super::null_as_default",
            skip_serializing_if = "Vec::is_empty"
        )]
        limit_to_regions: Vec<String>,
        #[serde(
            default,
            deserialize_with = "super::null_as_default",
            skip_serializing_if = "Vec::is_empty"
        )]
        limit_to_namespaces: Vec<String>,
    },
}

impl PollingPath {
    pub const S3_BUCKET: &'static str = "S3BucketPathExpression";
    pub const CLOUD_WATCH: &'static str = "CloudWatchPath";
    pub const AWS_INVENTORY: &'static str = "AwsInventoryPath";

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::S3Bucket { .. } => Self::S3_BUCKET,
            Self::CloudWatch { .. } => Self::CLOUD_WATCH,
            Self::AwsInventory { .. } => Self::AWS_INVENTORY,
        }
    }
}

/// One AWS location polled by the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollingResource {
    pub service_type: ContentType,
    pub authentication: PollingAuthentication,
    pub path: PollingPath,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPartyRef {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub resources: Vec<PollingResource>,
}

/// A polling source as sent to and returned by the collectors API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollingSource {
    #[serde(flatten)]
    pub source: Source,
    pub content_type: ContentType,
    pub scan_interval: i64,
    pub paused: bool,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub url: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub third_party_ref: ThirdPartyRef,
}

/// Create a polling source in a collector, returning the new source id
pub async fn create_polling_source(
    client: &SumoClient,
    source: &PollingSource,
    collector_id: i64,
) -> Result<i64> {
    let path = format!("v1/collectors/{}/sources", collector_id);
    let response = client.post(&path, &json!({ "source": source })).await?;

    let id = extract_id(&response, "source")?;
    tracing::info!(
        "Created polling source {} ({}) in collector {}",
        source.source.name,
        id,
        collector_id
    );
    Ok(id)
}

/// Fetch a polling source; `None` when it no longer exists
pub async fn get_polling_source(
    client: &SumoClient,
    collector_id: i64,
    id: i64,
) -> Result<Option<PollingSource>> {
    let Some(response) = client.get(&source_path(collector_id, id)).await? else {
        return Ok(None);
    };

    let body = response
        .body
        .get("source")
        .cloned()
        .with_context(|| format!("Response for source {} has no source object", id))?;

    let source = serde_json::from_value(body)
        .with_context(|| format!("Failed to parse polling source {}", id))?;

    Ok(Some(source))
}

/// Update a polling source addressed by its embedded id
pub async fn update_polling_source(
    client: &SumoClient,
    source: &PollingSource,
    collector_id: i64,
) -> Result<()> {
    let path = source_path(collector_id, source.source.id);
    client.put(&path, &json!({ "source": source })).await?;
    tracing::info!("Updated polling source {} in collector {}", source.source.id, collector_id);
    Ok(())
}
