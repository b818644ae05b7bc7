//! Configuration Management
//!
//! Provider settings for sumologic-resources. Each setting resolves in the
//! order command line > environment variable > config file > default.

use crate::sumologic::auth::{self, Credentials};
use crate::sumologic::client::SumoClient;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_ACCESS_ID: &str = "SUMOLOGIC_ACCESSID";
pub const ENV_ACCESS_KEY: &str = "SUMOLOGIC_ACCESSKEY";
pub const ENV_ENVIRONMENT: &str = "SUMOLOGIC_ENVIRONMENT";
pub const ENV_BASE_URL: &str = "SUMOLOGIC_BASE_URL";

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub access_id: Option<String>,
    #[serde(default)]
    pub access_key: Option<String>,
    /// Deployment name such as "us2" or "eu"
    #[serde(default)]
    pub environment: Option<String>,
    /// Overrides the URL derived from `environment`
    #[serde(default)]
    pub base_url: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sumologic-resources").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Apply command line and process environment on top of this file config
    pub fn effective(&self, cli: &Config) -> Config {
        self.effective_with(cli, |name| std::env::var(name).ok())
    }

    fn effective_with(&self, cli: &Config, env: impl Fn(&str) -> Option<String>) -> Config {
        let pick = |cli: &Option<String>, var: &str, file: &Option<String>| {
            non_empty(cli.clone())
                .or_else(|| non_empty(env(var)))
                .or_else(|| non_empty(file.clone()))
        };

        Config {
            access_id: pick(&cli.access_id, ENV_ACCESS_ID, &self.access_id),
            access_key: pick(&cli.access_key, ENV_ACCESS_KEY, &self.access_key),
            environment: pick(&cli.environment, ENV_ENVIRONMENT, &self.environment),
            base_url: pick(&cli.base_url, ENV_BASE_URL, &self.base_url),
        }
    }

    /// Get effective environment (configured > us2)
    pub fn effective_environment(&self) -> String {
        self.environment
            .clone()
            .unwrap_or_else(|| auth::DEFAULT_ENVIRONMENT.to_string())
    }

    /// Get effective API base URL (explicit base URL > derived from environment)
    pub fn effective_base_url(&self) -> Result<String> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None => auth::base_url_for_environment(&self.effective_environment()),
        }
    }

    pub fn credentials(&self) -> Result<Credentials> {
        Credentials::from_parts(self.access_id.clone(), self.access_key.clone())
    }

    /// Build an API client from resolved settings
    pub fn client(&self) -> Result<SumoClient> {
        let base_url = self.effective_base_url()?;
        tracing::info!("Using Sumo Logic API at {}", base_url);
        SumoClient::new(self.credentials()?, &base_url)
    }
}
