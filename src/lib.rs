//! Sumo Logic resource handlers
//!
//! Declarative management of Sumo Logic ingest budgets and polling sources.
//! The [`sumologic`] module talks to the REST API; [`resource`] translates
//! host attributes into API records and back.

pub mod config;
pub mod resource;
pub mod sumologic;
