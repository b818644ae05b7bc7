//! Resource abstraction layer
//!
//! Each managed resource type is a schema plus Create/Read/Update/Delete
//! handlers that translate between the host's untyped attributes and the
//! typed API records in [`crate::sumologic`].
//!
//! # Architecture
//!
//! - [`data`] - The attribute store capability handlers operate on
//! - [`schema`] - Attribute descriptors
//! - [`registry`] - Schemas of every resource type, built once
//! - [`dispatch`] - Maps a resource type and operation to its handler
//! - [`ingest_budget_v2`], [`polling_source`] - The handlers
//!
//! # Example
//!
//! ```ignore
//! use sumologic_resources::resource::{execute, Operation, ResourceData};
//!
//! async fn refresh(client: &SumoClient, d: &mut ResourceData) -> anyhow::Result<()> {
//!     execute("sumologic_ingest_budget_v2", Operation::Read, d, client).await
//! }
//! ```

pub mod data;
pub mod dispatch;
pub mod error;
pub mod ingest_budget_v2;
pub mod polling_source;
mod registry;
pub mod schema;
pub mod source;

pub use data::{AttributeReader, AttributeStore, ResourceData};
pub use dispatch::{execute, import_resource, Operation};
pub use error::ResourceError;
pub use registry::*;
