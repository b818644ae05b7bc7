//! `sumologic_polling_source` resource
//!
//! A source that scans an AWS location on an interval. Besides the shared
//! source attributes it carries exactly one authentication block and one
//! path block, each selected by a `type` discriminator:
//!
//! | authentication.type          | uses                     |
//! |------------------------------|--------------------------|
//! | `S3BucketAuthentication`     | access_key, secret_key   |
//! | `AWSRoleBasedAuthentication` | role_arn                 |
//!
//! | path.type                | uses                                                |
//! |--------------------------|-----------------------------------------------------|
//! | `S3BucketPathExpression` | bucket_name, path_expression                        |
//! | `CloudWatchPath`         | limit_to_regions, limit_to_namespaces, tag_filters  |
//! | `AwsInventoryPath`       | limit_to_regions, limit_to_namespaces               |
//!
//! Source ids are strings in state and integers on the wire.

use super::data::{AttributeReader, AttributeStore};
use super::error::ResourceError;
use super::schema::{Field, FieldKind, ResourceSchema};
use super::source::{self, resource_to_source, source_fields, source_id, source_to_resource};
use crate::sumologic::client::SumoClient;
use crate::sumologic::polling_sources::{
    self, ContentType, PollingAuthentication, PollingPath, PollingResource, PollingSource,
    TagFilter, ThirdPartyRef,
};
use anyhow::Result;
use serde_json::{json, Map, Value};

pub const RESOURCE_TYPE: &str = "sumologic_polling_source";

/// `sourceType` of every polling source
const SOURCE_TYPE: &str = "Polling";

pub fn schema() -> ResourceSchema {
    let mut fields = source_fields();

    fields.extend([
        Field::string("content_type")
            .required()
            .force_new()
            .one_of(ContentType::NAMES),
        Field::int("scan_interval").required(),
        Field::bool("paused").required(),
        Field::string("url").computed(),
        Field::block(
            "authentication",
            vec![
                Field::string("type").required().one_of(&[
                    PollingAuthentication::S3_BUCKET,
                    PollingAuthentication::ROLE_BASED,
                ]),
                Field::string("access_key").optional(),
                Field::string("secret_key").optional(),
                Field::string("role_arn").optional(),
            ],
        )
        .required()
        .force_new()
        .single(),
        Field::block(
            "path",
            vec![
                Field::string("type").required().one_of(&[
                    PollingPath::S3_BUCKET,
                    PollingPath::CLOUD_WATCH,
                    PollingPath::AWS_INVENTORY,
                ]),
                Field::string("bucket_name").optional(),
                Field::string("path_expression").optional(),
                Field::list("limit_to_regions", FieldKind::String).optional(),
                Field::list("limit_to_namespaces", FieldKind::String).optional(),
                Field::block(
                    "tag_filters",
                    vec![
                        Field::string("type").optional(),
                        Field::string("namespace").optional(),
                        Field::list("tags", FieldKind::String).optional(),
                    ],
                )
                .optional(),
            ],
        )
        .required()
        .force_new()
        .single(),
    ]);

    ResourceSchema::new(RESOURCE_TYPE, fields)
}

fn content_type(d: &dyn AttributeStore) -> Result<ContentType, ResourceError> {
    let name = d.get_string("content_type")?;
    ContentType::from_name(&name).ok_or(ResourceError::UnknownContentType(name))
}

/// Extract the authentication variant selected by `authentication.type`
pub fn get_authentication(
    d: &dyn AttributeStore,
    content_type: &ContentType,
) -> Result<PollingAuthentication, ResourceError> {
    let auth = d
        .get_block("authentication")?
        .ok_or(ResourceError::MissingBlock("authentication"))?;

    let auth_type = auth.get_string("type")?;
    match auth_type.as_str() {
        PollingAuthentication::S3_BUCKET => {
            if *content_type == ContentType::AwsInventory {
                let err = ResourceError::UnsupportedAuthType {
                    auth_type,
                    content_type: content_type.as_str().to_string(),
                };
                tracing::error!("{}", err);
                return Err(err);
            }

            Ok(PollingAuthentication::S3Bucket {
                access_key: auth.get_string("access_key")?,
                secret_key: auth.get_string("secret_key")?,
            })
        }
        PollingAuthentication::ROLE_BASED => Ok(PollingAuthentication::RoleBased {
            role_arn: auth.get_string("role_arn")?,
        }),
        _ => {
            let err = ResourceError::UnknownAuthType(auth_type);
            tracing::error!("{}", err);
            Err(err)
        }
    }
}

/// Extract the path variant selected by `path.type`
pub fn get_path_settings(d: &dyn AttributeStore) -> Result<PollingPath, ResourceError> {
    let path = d.get_block("path")?.ok_or(ResourceError::MissingBlock("path"))?;

    let path_type = path.get_string("type")?;
    match path_type.as_str() {
        PollingPath::S3_BUCKET => Ok(PollingPath::S3Bucket {
            bucket_name: path.get_string("bucket_name")?,
            path_expression: path.get_string("path_expression")?,
        }),
        PollingPath::CLOUD_WATCH => Ok(PollingPath::CloudWatch {
            limit_to_regions: path.get_string_list("limit_to_regions")?,
            limit_to_namespaces: path.get_string_list("limit_to_namespaces")?,
            tag_filters: get_tag_filters(&path)?,
        }),
        PollingPath::AWS_INVENTORY => Ok(PollingPath::AwsInventory {
            limit_to_regions: path.get_string_list("limit_to_regions")?,
            limit_to_namespaces: path.get_string_list("limit_to_namespaces")?,
        }),
        _ => {
            let err = ResourceError::UnknownPathType(path_type);
            tracing::error!("{}", err);
            Err(err)
        }
    }
}

fn get_tag_filters(path: &Map<String, Value>) -> Result<Vec<TagFilter>, ResourceError> {
    path.get_block_list("tag_filters")?
        .iter()
        .map(|filter| -> Result<TagFilter, ResourceError> {
            Ok(TagFilter {
                filter_type: filter.get_string("type")?,
                namespace: filter.get_string("namespace")?,
                tags: filter.get_string_list("tags")?,
            })
        })
        .collect()
}

/// Build the API record from attributes
pub fn resource_to_polling_source(d: &dyn AttributeStore) -> Result<PollingSource, ResourceError> {
    let mut source = resource_to_source(d)?;
    source.source_type = SOURCE_TYPE.to_string();

    let content_type = content_type(d)?;
    let authentication = get_authentication(d, &content_type)?;
    let path = get_path_settings(d)?;

    Ok(PollingSource {
        source,
        content_type: content_type.clone(),
        scan_interval: d.get_int("scan_interval")?,
        paused: d.get_bool("paused")?,
        url: d.get_string("url")?,
        third_party_ref: ThirdPartyRef {
            resources: vec![PollingResource {
                service_type: content_type,
                authentication,
                path,
            }],
        },
    })
}

pub fn flatten_tag_filters(filters: &[TagFilter]) -> Vec<Value> {
    filters
        .iter()
        .map(|f| {
            json!({
                "type": f.filter_type,
                "namespace": f.namespace,
                "tags": f.tags,
            })
        })
        .collect()
}

fn flatten_path(path: &PollingPath) -> Value {
    let empty: &[String] = &[];
    let (bucket_name, path_expression, regions, namespaces, tag_filters) = match path {
        PollingPath::S3Bucket {
            bucket_name,
            path_expression,
        } => (bucket_name.as_str(), path_expression.as_str(), empty, empty, Vec::new()),
        PollingPath::CloudWatch {
            limit_to_regions,
            limit_to_namespaces,
            tag_filters,
        } => (
            "",
            "",
            limit_to_regions.as_slice(),
            limit_to_namespaces.as_slice(),
            flatten_tag_filters(tag_filters),
        ),
        PollingPath::AwsInventory {
            limit_to_regions,
            limit_to_namespaces,
        } => (
            "",
            "",
            limit_to_regions.as_slice(),
            limit_to_namespaces.as_slice(),
            Vec::new(),
        ),
    };

    json!({
        "type": path.type_name(),
        "bucket_name": bucket_name,
        "path_expression": path_expression,
        "limit_to_regions": regions,
        "limit_to_namespaces": namespaces,
        "tag_filters": tag_filters,
    })
}

/// Path blocks for every polled resource
pub fn get_third_party_path_attributes(resources: &[PollingResource]) -> Vec<Value> {
    resources.iter().map(|r| flatten_path(&r.path)).collect()
}

/// Authentication block; keys the API masks keep their configured values
fn flatten_authentication(
    auth: &PollingAuthentication,
    configured: Option<&Map<String, Value>>,
) -> Value {
    let configured_value = |key: &str| {
        configured
            .and_then(|c| c.get_string(key).ok())
            .unwrap_or_default()
    };
    let or_configured = |remote: &str, key: &str| {
        if remote.is_empty() {
            configured_value(key)
        } else {
            remote.to_string()
        }
    };

    match auth {
        PollingAuthentication::S3Bucket {
            access_key,
            secret_key,
        } => json!({
            "type": auth.type_name(),
            "access_key": or_configured(access_key, "access_key"),
            "secret_key": or_configured(secret_key, "secret_key"),
            "role_arn": "",
        }),
        PollingAuthentication::RoleBased { role_arn } => json!({
            "type": auth.type_name(),
            "access_key": "",
            "secret_key": "",
            "role_arn": role_arn,
        }),
    }
}

/// Write an API record back into attributes
///
/// Fails when the configured authentication block is malformed, since its
/// keys fill in the ones the API masks.
pub fn polling_source_to_resource(
    d: &mut dyn AttributeStore,
    source: &PollingSource,
) -> Result<(), ResourceError> {
    let resources = &source.third_party_ref.resources;

    d.set("path", Value::Array(get_third_party_path_attributes(resources)));

    let configured = d.get_block("authentication")?;
    let authentication: Vec<Value> = resources
        .iter()
        .map(|r| flatten_authentication(&r.authentication, configured.as_ref()))
        .collect();
    d.set("authentication", Value::Array(authentication));

    source_to_resource(d, &source.source);
    d.set("content_type", json!(source.content_type.as_str()));
    d.set("scan_interval", json!(source.scan_interval));
    d.set("paused", json!(source.paused));
    d.set("url", json!(source.url));
    Ok(())
}

pub async fn create(d: &mut dyn AttributeStore, client: &SumoClient) -> Result<()> {
    if d.id().is_empty() {
        let source = resource_to_polling_source(d)?;
        let collector_id = d.get_int("collector_id")?;

        let id = polling_sources::create_polling_source(client, &source, collector_id).await?;
        d.set_id(&id.to_string());
    }

    read(d, client).await
}

pub async fn read(d: &mut dyn AttributeStore, client: &SumoClient) -> Result<()> {
    let id = source_id(d)?;
    let collector_id = d.get_int("collector_id")?;

    let Some(source) = polling_sources::get_polling_source(client, collector_id, id).await? else {
        tracing::warn!("Polling source not found, removing from state: {}", id);
        d.set_id("");
        return Ok(());
    };

    polling_source_to_resource(d, &source)?;
    Ok(())
}

pub async fn update(d: &mut dyn AttributeStore, client: &SumoClient) -> Result<()> {
    let source = resource_to_polling_source(d)?;
    let collector_id = d.get_int("collector_id")?;

    polling_sources::update_polling_source(client, &source, collector_id).await?;

    read(d, client).await
}

pub async fn delete(d: &mut dyn AttributeStore, client: &SumoClient) -> Result<()> {
    source::delete(d, client).await
}

pub async fn import(d: &mut dyn AttributeStore, client: &SumoClient) -> Result<()> {
    source::import(d, client).await
}
