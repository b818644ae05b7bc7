//! Sources
//!
//! Fields shared by every source type, and collector/source lookups.

use super::client::SumoClient;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Timestamp format hint attached to a source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultDateFormat {
    pub format: String,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub locator: String,
}

/// Processing rule applied to a source's messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub filter_type: String,
    pub name: String,
    pub regexp: String,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub mask: String,
}

/// Configuration common to all source types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(default, deserialize_with = "super::null_as_default", skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(rename = "sourceType")]
    pub source_type: String,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub category: String,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub host_name: String,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        rename = "timeZone",
        skip_serializing_if = "String::is_empty"
    )]
    pub timezone: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub automatic_date_parsing: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub multiline_processing_enabled: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub use_autoline_matching: bool,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub manual_prefix_regexp: String,
    #[serde(default, deserialize_with = "super::null_as_default", rename = "forceTimeZone")]
    pub force_timezone: bool,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub default_date_formats: Vec<DefaultDateFormat>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub filters: Vec<Filter>,
    #[serde(default, deserialize_with = "super::null_as_default", skip_serializing_if = "is_zero")]
    pub cutoff_timestamp: i64,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub cutoff_relative_time: String,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub fields: Map<String, Value>,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

pub(crate) fn source_path(collector_id: i64, source_id: i64) -> String {
    format!("v1/collectors/{}/sources/{}", collector_id, source_id)
}

/// Delete a source of any type
pub async fn destroy_source(client: &SumoClient, collector_id: i64, source_id: i64) -> Result<()> {
    client.delete(&source_path(collector_id, source_id)).await?;
    tracing::info!("Deleted source {} from collector {}", source_id, collector_id);
    Ok(())
}

pub(crate) fn extract_id(body: &Value, key: &str) -> Result<i64> {
    body.get(key)
        .and_then(|v| v.get("id"))
        .and_then(|v| v.as_i64())
        .with_context(|| format!("Response has no {}.id", key))
}

/// Resolve a collector name to its identifier
pub async fn find_collector_id(client: &SumoClient, name: &str) -> Result<i64> {
    let path = format!("v1/collectors/name/{}", urlencoding::encode(name));
    let response = client
        .get(&path)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Collector not found: {}", name))?;

    extract_id(&response.body, "collector")
}

/// Resolve a source name within a collector to its identifier
pub async fn find_source_id(client: &SumoClient, collector_id: i64, name: &str) -> Result<i64> {
    let path = format!(
        "v1/collectors/{}/sources/name/{}",
        collector_id,
        urlencoding::encode(name)
    );
    let response = client.get(&path).await?.ok_or_else(|| {
        anyhow::anyhow!("Source not found in collector {}: {}", collector_id, name)
    })?;

    extract_id(&response.body, "source")
}
