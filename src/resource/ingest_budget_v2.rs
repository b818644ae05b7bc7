//! `sumologic_ingest_budget_v2` resource

use super::data::AttributeStore;
use super::error::ResourceError;
use super::schema::{Field, ResourceSchema};
use crate::sumologic::client::SumoClient;
use crate::sumologic::ingest_budgets::{self, IngestBudgetV2};
use anyhow::Result;
use serde_json::json;

pub const RESOURCE_TYPE: &str = "sumologic_ingest_budget_v2";

pub fn schema() -> ResourceSchema {
    ResourceSchema::new(
        RESOURCE_TYPE,
        vec![
            Field::string("description").optional(),
            Field::string("timezone").required(),
            Field::string("action").required(),
            Field::int("capacity_bytes").required(),
            Field::string("reset_time").required(),
            Field::int("audit_threshold").optional(),
            Field::string("scope").required(),
            Field::string("name").required(),
        ],
    )
}

/// Build the API record from attributes, carrying the current id
pub fn resource_to_ingest_budget_v2(
    d: &dyn AttributeStore,
) -> Result<IngestBudgetV2, ResourceError> {
    Ok(IngestBudgetV2 {
        id: d.id().to_string(),
        name: d.get_string("name")?,
        scope: d.get_string("scope")?,
        timezone: d.get_string("timezone")?,
        reset_time: d.get_string("reset_time")?,
        description: d.get_string("description")?,
        action: d.get_string("action")?,
        capacity_bytes: d.get_int("capacity_bytes")?,
        audit_threshold: d.get_int("audit_threshold")?,
    })
}

/// Write an API record back into attributes
pub fn ingest_budget_v2_to_resource(d: &mut dyn AttributeStore, budget: &IngestBudgetV2) {
    d.set("name", json!(budget.name));
    d.set("scope", json!(budget.scope));
    d.set("timezone", json!(budget.timezone));
    d.set("reset_time", json!(budget.reset_time));
    d.set("audit_threshold", json!(budget.audit_threshold));
    d.set("description", json!(budget.description));
    d.set("action", json!(budget.action));
    d.set("capacity_bytes", json!(budget.capacity_bytes));
}

pub async fn create(d: &mut dyn AttributeStore, client: &SumoClient) -> Result<()> {
    if d.id().is_empty() {
        let budget = resource_to_ingest_budget_v2(d)?;
        let id = ingest_budgets::create_ingest_budget_v2(client, &budget).await?;
        d.set_id(&id);
    }

    read(d, client).await
}

pub async fn read(d: &mut dyn AttributeStore, client: &SumoClient) -> Result<()> {
    let id = d.id().to_string();

    let Some(budget) = ingest_budgets::get_ingest_budget_v2(client, &id).await? else {
        tracing::warn!("IngestBudgetV2 not found, removing from state: {}", id);
        d.set_id("");
        return Ok(());
    };

    ingest_budget_v2_to_resource(d, &budget);
    Ok(())
}

pub async fn update(d: &mut dyn AttributeStore, client: &SumoClient) -> Result<()> {
    let budget = resource_to_ingest_budget_v2(d)?;
    ingest_budgets::update_ingest_budget_v2(client, &budget).await?;

    read(d, client).await
}

pub async fn delete(d: &mut dyn AttributeStore, client: &SumoClient) -> Result<()> {
    ingest_budgets::delete_ingest_budget_v2(client, d.id()).await
}
