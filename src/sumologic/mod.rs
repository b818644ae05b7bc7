//! Sumo Logic API interaction module
//!
//! This module provides the typed API surface the resource handlers call
//! into: credentials, the HTTP client, and one module per API family.
//!
//! # Module Structure
//!
//! - [`auth`] - Access ID / key credentials and deployment endpoints
//! - [`client`] - Main client for making API requests
//! - [`http`] - HTTP utilities for REST API calls
//! - [`ingest_budgets`] - Ingest budget (v2) payloads and calls
//! - [`sources`] - Fields shared by all sources, collector lookups
//! - [`polling_sources`] - Polling source payloads and calls
//!
//! # Example
//!
//! ```ignore
//! use crate::sumologic::{auth::Credentials, client::SumoClient, ingest_budgets};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = SumoClient::new(
//!         Credentials::new("suXXXX", "key"),
//!         "https://api.us2.sumologic.com/api/",
//!     )?;
//!     let budget = ingest_budgets::get_ingest_budget_v2(&client, "0000000000000001").await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
pub mod ingest_budgets;
pub mod polling_sources;
pub mod sources;

use serde::{Deserialize, Deserializer};

/// Read an optional API field, treating an explicit `null` like a missing key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "null_as_default")]
        count: i64,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
    }

    #[test]
    fn test_null_reads_as_zero_value() {
        let record: Record = serde_json::from_value(json!({"count": null, "tags": null})).unwrap();
        assert_eq!(record, Record::default());

        let record: Record = serde_json::from_value(json!({})).unwrap();
        assert_eq!(record, Record::default());

        let record: Record = serde_json::from_value(json!({"count": 3, "tags": ["a"]})).unwrap();
        assert_eq!(record.count, 3);
        assert_eq!(record.tags, vec!["a"]);
    }
}
