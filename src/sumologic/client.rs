//! Sumo Logic Client
//!
//! Main client for interacting with the Sumo Logic APIs, combining
//! credentials and HTTP functionality.

use super::auth::Credentials;
use super::http::{ApiResponse, SumoHttpClient};
use anyhow::{Context, Result};
use serde_json::Value;
use url::Url;

/// Main Sumo Logic client
#[derive(Clone, Debug)]
pub struct SumoClient {
    pub credentials: Credentials,
    pub http: SumoHttpClient,
    pub base_url: Url,
}

impl SumoClient {
    /// Create a new client against an API base URL such as
    /// `https://api.us2.sumologic.com/api/`
    pub fn new(credentials: Credentials, base_url: &str) -> Result<Self> {
        // Url::join drops the last segment unless the base ends with a slash
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url = Url::parse(&normalized)
            .with_context(|| format!("Invalid Sumo Logic base URL: {}", base_url))?;

        Ok(Self {
            credentials,
            http: SumoHttpClient::new()?,
            base_url,
        })
    }

    /// Build an API URL from a relative path such as `v2/ingestBudgets`
    pub fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Invalid API path: {}", path))
    }

    /// Make a GET request; `None` when the object does not exist
    pub async fn get(&self, path: &str) -> Result<Option<ApiResponse>> {
        let url = self.url(path)?;
        self.http.get(&url, &self.credentials).await
    }

    /// Make a POST request
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path)?;
        self.http.post(&url, &self.credentials, body).await
    }

    /// Make a PUT request guarded by the object's current entity tag
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path)?;

        let current = self
            .http
            .get(&url, &self.credentials)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Cannot update {}: object not found", path))?;

        self.http
            .put(&url, &self.credentials, body, current.etag.as_deref())
            .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path)?;
        self.http.delete(&url, &self.credentials).await
    }
}
