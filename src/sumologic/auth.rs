//! Sumo Logic Authentication
//!
//! Access ID / access key credentials and deployment endpoint resolution.

use anyhow::{Context, Result};
use std::fmt;

/// Deployment used when none is configured
pub const DEFAULT_ENVIRONMENT: &str = "us2";

/// API endpoint of the first US deployment
const US1_BASE_URL: &str = "https://api.sumologic.com/api/";

/// Access ID / access key pair sent with every request as HTTP basic auth
#[derive(Clone)]
pub struct Credentials {
    pub access_id: String,
    access_key: String,
}

impl Credentials {
    pub fn new(access_id: &str, access_key: &str) -> Self {
        Self {
            access_id: access_id.to_string(),
            access_key: access_key.to_string(),
        }
    }

    /// Build credentials, failing when either half is missing
    pub fn from_parts(access_id: Option<String>, access_key: Option<String>) -> Result<Self> {
        let access_id = access_id.filter(|s| !s.is_empty()).context(
            "No Sumo Logic access ID configured. Set SUMOLOGIC_ACCESSID or use --access-id",
        )?;
        let access_key = access_key.filter(|s| !s.is_empty()).context(
            "No Sumo Logic access key configured. Set SUMOLOGIC_ACCESSKEY or use --access-key",
        )?;

        Ok(Self {
            access_id,
            access_key,
        })
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }
}

// Security: never print the access key
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_id", &self.access_id)
            .field("access_key", &"********")
            .finish()
    }
}

/// Validate a deployment name before it is placed in a host name
fn validate_environment(environment: &str) -> bool {
    !environment.is_empty() && environment.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Resolve the API base URL for a deployment (e.g. "us2", "eu", "fed")
pub fn base_url_for_environment(environment: &str) -> Result<String> {
    let environment = environment.trim().to_lowercase();

    if !validate_environment(&environment) {
        return Err(anyhow::anyhow!(
            "Invalid Sumo Logic environment: '{}'",
            environment
        ));
    }

    let url = match environment.as_str() {
        "us1" | "prod" => US1_BASE_URL.to_string(),
        "fed" => "https://api.fed.sumologic.com/api/".to_string(),
        other => format!("https://api.{}.sumologic.com/api/", other),
    };

    Ok(url)
}
