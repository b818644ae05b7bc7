//! Handler Dispatch
//!
//! Maps resource type names and lifecycle operations to the concrete
//! handlers.

use super::data::{AttributeStore, ResourceData};
use super::error::ResourceError;
use super::{ingest_budget_v2, polling_source};
use crate::sumologic::client::SumoClient;
use anyhow::Result;
use std::fmt;

/// Lifecycle operation requested by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Run one lifecycle operation against a resource instance
pub async fn execute(
    resource_type: &str,
    operation: Operation,
    d: &mut dyn AttributeStore,
    client: &SumoClient,
) -> Result<()> {
    tracing::info!(
        "execute: resource={}, operation={}, id={}",
        resource_type,
        operation,
        d.id()
    );

    match resource_type {
        ingest_budget_v2::RESOURCE_TYPE => match operation {
            Operation::Create => ingest_budget_v2::create(d, client).await,
            Operation::Read => ingest_budget_v2::read(d, client).await,
            Operation::Update => ingest_budget_v2::update(d, client).await,
            Operation::Delete => ingest_budget_v2::delete(d, client).await,
        },
        polling_source::RESOURCE_TYPE => match operation {
            Operation::Create => polling_source::create(d, client).await,
            Operation::Read => polling_source::read(d, client).await,
            Operation::Update => polling_source::update(d, client).await,
            Operation::Delete => polling_source::delete(d, client).await,
        },
        _ => Err(ResourceError::UnknownResourceType(resource_type.to_string()).into()),
    }
}

/// Adopt an existing remote object: resolve the import id, then read it
///
/// Ingest budgets are imported by their id as-is. Sources accept
/// `<collector>/<source>` where each part is a numeric id or a name.
pub async fn import_resource(
    resource_type: &str,
    id: &str,
    client: &SumoClient,
) -> Result<ResourceData> {
    let mut d = ResourceData::with_id(id, Default::default());

    match resource_type {
        ingest_budget_v2::RESOURCE_TYPE => {}
        polling_source::RESOURCE_TYPE => polling_source::import(&mut d, client).await?,
        _ => return Err(ResourceError::UnknownResourceType(resource_type.to_string()).into()),
    }

    execute(resource_type, Operation::Read, &mut d, client).await?;

    if !d.is_managed() {
        return Err(anyhow::anyhow!(
            "Cannot import {} {}: object not found",
            resource_type,
            id
        ));
    }

    Ok(d)
}
