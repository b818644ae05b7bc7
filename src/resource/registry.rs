//! Resource Registry - Schemas of the managed resource types
//!
//! Builds every resource schema once and provides lookup functions for the
//! dispatcher and the command line.

use super::schema::ResourceSchema;
use super::{ingest_budget_v2, polling_source};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Global registry, keyed by resource type name
static REGISTRY: OnceLock<HashMap<&'static str, ResourceSchema>> = OnceLock::new();

/// Get the resource registry (builds the schemas on first access)
pub fn get_registry() -> &'static HashMap<&'static str, ResourceSchema> {
    REGISTRY.get_or_init(|| {
        [ingest_budget_v2::schema(), polling_source::schema()]
            .into_iter()
            .map(|schema| (schema.name, schema))
            .collect()
    })
}

/// Get a resource schema by type name
pub fn get_resource(key: &str) -> Option<&'static ResourceSchema> {
    get_registry().get(key)
}

/// Get all resource type names, sorted
pub fn get_all_resource_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = get_registry().keys().copied().collect();
    keys.sort_unstable();
    keys
}
