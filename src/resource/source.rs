//! Shared Source Attributes
//!
//! Schema fields, translation and import/delete behaviour common to every
//! source resource. Source-specific handlers embed these.

use super::data::{AttributeReader, AttributeStore};
use super::error::ResourceError;
use super::schema::Field;
use crate::sumologic::client::SumoClient;
use crate::sumologic::sources::{self, DefaultDateFormat, Filter, Source};
use anyhow::Result;
use serde_json::{json, Value};

const FILTER_TYPES: &[&str] = &["Exclude", "Include", "Hash", "Mask", "Forward"];

/// Attributes shared by all source resources
pub fn source_fields() -> Vec<Field> {
    vec![
        Field::string("name").required(),
        Field::string("description").optional(),
        Field::string("category").optional(),
        Field::string("host_name").optional(),
        Field::string("timezone").optional(),
        Field::bool("automatic_date_parsing")
            .optional()
            .default_value(json!(true)),
        Field::bool("multiline_processing_enabled")
            .optional()
            .default_value(json!(true)),
        Field::bool("use_autoline_matching")
            .optional()
            .default_value(json!(true)),
        Field::string("manual_prefix_regexp").optional(),
        Field::bool("force_timezone")
            .optional()
            .default_value(json!(false)),
        Field::block(
            "default_date_format",
            vec![
                Field::string("format").required(),
                Field::string("locator").optional(),
            ],
        )
        .optional(),
        Field::block(
            "filters",
            vec![
                Field::string("filter_type").required().one_of(FILTER_TYPES),
                Field::string("name").required(),
                Field::string("regexp").required(),
                Field::string("mask").optional(),
            ],
        )
        .optional(),
        Field::int("cutoff_timestamp").optional(),
        Field::string("cutoff_relative_time").optional(),
        Field::map("fields").optional(),
        Field::int("collector_id").required().force_new(),
        Field::bool("destroy").optional().default_value(json!(true)),
    ]
}

/// Parse an integer identifier held as a string attribute; empty means unassigned
pub fn parse_id(field: &'static str, value: &str) -> Result<i64, ResourceError> {
    if value.is_empty() {
        return Ok(0);
    }

    value.trim().parse::<i64>().map_err(|_| ResourceError::InvalidId {
        field,
        value: value.to_string(),
    })
}

/// Source id of the resource instance
pub fn source_id(d: &dyn AttributeStore) -> Result<i64, ResourceError> {
    parse_id("source id", d.id())
}

/// Build the shared source record from attributes
pub fn resource_to_source(d: &dyn AttributeStore) -> Result<Source, ResourceError> {
    let default_date_formats = d
        .get_block_list("default_date_format")?
        .iter()
        .map(|block| {
            Ok(DefaultDateFormat {
                format: block.get_string("format")?,
                locator: block.get_string("locator")?,
            })
        })
        .collect::<Result<Vec<_>, ResourceError>>()?;

    let filters = d
        .get_block_list("filters")?
        .iter()
        .map(|block| {
            Ok(Filter {
                filter_type: block.get_string("filter_type")?,
                name: block.get_string("name")?,
                regexp: block.get_string("regexp")?,
                mask: block.get_string("mask")?,
            })
        })
        .collect::<Result<Vec<_>, ResourceError>>()?;

    Ok(Source {
        id: source_id(d)?,
        source_type: String::new(),
        name: d.get_string("name")?,
        description: d.get_string("description")?,
        category: d.get_string("category")?,
        host_name: d.get_string("host_name")?,
        timezone: d.get_string("timezone")?,
        automatic_date_parsing: d.get_bool("automatic_date_parsing")?,
        multiline_processing_enabled: d.get_bool("multiline_processing_enabled")?,
        use_autoline_matching: d.get_bool("use_autoline_matching")?,
        manual_prefix_regexp: d.get_string("manual_prefix_regexp")?,
        force_timezone: d.get_bool("force_timezone")?,
        default_date_formats,
        filters,
        cutoff_timestamp: d.get_int("cutoff_timestamp")?,
        cutoff_relative_time: d.get_string("cutoff_relative_time")?,
        fields: d.get_map("fields")?,
    })
}

/// Write the shared source record back into attributes
pub fn source_to_resource(d: &mut dyn AttributeStore, source: &Source) {
    let default_date_formats: Vec<Value> = source
        .default_date_formats
        .iter()
        .map(|f| json!({ "format": f.format, "locator": f.locator }))
        .collect();

    let filters: Vec<Value> = source
        .filters
        .iter()
        .map(|f| {
            json!({
                "filter_type": f.filter_type,
                "name": f.name,
                "regexp": f.regexp,
                "mask": f.mask,
            })
        })
        .collect();

    d.set("name", json!(source.name));
    d.set("description", json!(source.description));
    d.set("category", json!(source.category));
    d.set("host_name", json!(source.host_name));
    d.set("timezone", json!(source.timezone));
    d.set("automatic_date_parsing", json!(source.automatic_date_parsing));
    d.set("multiline_processing_enabled", json!(source.multiline_processing_enabled));
    d.set("use_autoline_matching", json!(source.use_autoline_matching));
    d.set("manual_prefix_regexp", json!(source.manual_prefix_regexp));
    d.set("force_timezone", json!(source.force_timezone));
    d.set("default_date_format", Value::Array(default_date_formats));
    d.set("filters", Value::Array(filters));
    d.set("cutoff_timestamp", json!(source.cutoff_timestamp));
    d.set("cutoff_relative_time", json!(source.cutoff_relative_time));
    d.set("fields", Value::Object(source.fields.clone()));
}

/// `destroy` defaults to true when the state predates the attribute
fn destroy_enabled(d: &dyn AttributeStore) -> Result<bool, ResourceError> {
    match d.get("destroy") {
        None | Some(Value::Null) => Ok(true),
        Some(_) => d.get_bool("destroy"),
    }
}

/// Delete the remote source unless `destroy = false` asks to keep it
pub async fn delete(d: &mut dyn AttributeStore, client: &SumoClient) -> Result<()> {
    let id = source_id(d)?;
    let collector_id = d.get_int("collector_id")?;

    if !destroy_enabled(d)? {
        tracing::info!(
            "Leaving source {} in collector {} in place (destroy = false)",
            id,
            collector_id
        );
        return Ok(());
    }

    sources::destroy_source(client, collector_id, id).await
}

/// Resolve an import identifier of the form `<collector>/<source>`, where both
/// parts are either numeric ids or names
pub async fn import(d: &mut dyn AttributeStore, client: &SumoClient) -> Result<()> {
    let raw = d.id().to_string();
    let Some((collector, source)) = raw.split_once('/') else {
        return Err(ResourceError::InvalidImportId(raw.clone()).into());
    };

    if collector.is_empty() || source.is_empty() || source.contains('/') {
        return Err(ResourceError::InvalidImportId(raw.clone()).into());
    }

    match collector.parse::<i64>() {
        Ok(collector_id) => {
            let source_id = parse_id("source id", source)?;
            d.set("collector_id", json!(collector_id));
            d.set_id(&source_id.to_string());
        }
        Err(_) => {
            let collector_id = sources::find_collector_id(client, collector).await?;
            let source_id = sources::find_source_id(client, collector_id, source).await?;
            d.set("collector_id", json!(collector_id));
            d.set("name", json!(source));
            d.set_id(&source_id.to_string());
        }
    }

    tracing::info!("Importing source {}", raw);
    Ok(())
}
