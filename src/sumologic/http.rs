//! HTTP utilities for Sumo Logic REST API calls

use super::auth::Credentials;
use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let total = body.chars().count();
    let truncated = if total > MAX_LOG_BODY_LENGTH {
        format!(
            "{}... [truncated, {} bytes total]",
            body.chars().take(MAX_LOG_BODY_LENGTH).collect::<String>(),
            body.len()
        )
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Pull the first message out of a Sumo Logic error envelope:
/// `{"id": "...", "errors": [{"code": "...", "message": "..."}]}`
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("errors")
        .and_then(|v| v.as_array())
        .and_then(|errors| errors.first())
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
}

/// A successful response body together with its entity tag
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub body: Value,
    pub etag: Option<String>,
}

/// HTTP client wrapper for Sumo Logic API calls
#[derive(Clone, Debug)]
pub struct SumoHttpClient {
    client: Client,
}

impl SumoHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sumologic-resources/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    fn authorized(&self, request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        request.basic_auth(&credentials.access_id, Some(credentials.access_key()))
    }

    /// Make a GET request; a 404 means the object does not exist and yields `None`
    pub async fn get(&self, url: &Url, credentials: &Credentials) -> Result<Option<ApiResponse>> {
        tracing::debug!("GET {}", url);

        let response = self
            .authorized(self.client.get(url.clone()), credentials)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("GET {} returned 404", url);
            return Ok(None);
        }

        let etag = response
            .headers()
            .get(reqwest::header::ETAG)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        check_status(status, &body)?;

        let body = parse_body(&body)?;
        Ok(Some(ApiResponse { body, etag }))
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, url: &Url, credentials: &Credentials, body: &Value) -> Result<Value> {
        tracing::debug!("POST {}", url);

        let response = self
            .authorized(self.client.post(url.clone()), credentials)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .context("Failed to read response body")?;

        check_status(status, &response_body)?;

        parse_body(&response_body)
    }

    /// Make a PUT request, sending `If-Match` when an entity tag is known
    pub async fn put(
        &self,
        url: &Url,
        credentials: &Credentials,
        body: &Value,
        etag: Option<&str>,
    ) -> Result<Value> {
        tracing::debug!("PUT {}", url);

        let mut request = self
            .authorized(self.client.put(url.clone()), credentials)
            .json(body);

        if let Some(etag) = etag {
            request = request.header(reqwest::header::IF_MATCH, etag);
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .context("Failed to read response body")?;

        check_status(status, &response_body)?;

        parse_body(&response_body)
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &Url, credentials: &Credentials) -> Result<()> {
        tracing::debug!("DELETE {}", url);

        let response = self
            .authorized(self.client.delete(url.clone()), credentials)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        check_status(status, &body)
    }
}

fn check_status(status: StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
    tracing::error!("API error: {} - {}", status, sanitize_for_log(body));

    match error_message(body) {
        Some(message) => Err(anyhow::anyhow!("API request failed: {} - {}", status, message)),
        None => Err(anyhow::anyhow!("API request failed: {}", status)),
    }
}

fn parse_body(body: &str) -> Result<Value> {
    // Handle empty response
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(body).context("Failed to parse response JSON")
}
