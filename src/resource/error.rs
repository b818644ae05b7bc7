//! Configuration errors raised while translating attributes

use thiserror::Error;

/// Errors raised by the resource handlers themselves.
///
/// API and transport failures are not represented here; they propagate
/// unchanged as `anyhow::Error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("attribute '{key}' should be {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },

    #[error("missing required block '{0}'")]
    MissingBlock(&'static str),

    #[error("Unknown authType: {0}")]
    UnknownAuthType(String),

    #[error("Unsupported authType: {auth_type} for {content_type} source")]
    UnsupportedAuthType {
        auth_type: String,
        content_type: String,
    },

    #[error("Unknown resourceType in path: {0}")]
    UnknownPathType(String),

    #[error("Unknown content_type: {0}")]
    UnknownContentType(String),

    #[error("invalid {field} '{value}': expected an integer")]
    InvalidId { field: &'static str, value: String },

    #[error("invalid import id '{0}': expected <collector>/<source>")]
    InvalidImportId(String),

    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),
}
