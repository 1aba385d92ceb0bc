use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub history: HistoryConfig,
    pub submission: SubmissionConfig,
}

/// Backend endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub submit_path: String,
    pub reviews_path: String,
    pub health_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:6543/api".to_string(),
            submit_path: "/reviews".to_string(),
            reviews_path: "/reviews".to_string(),
            health_path: "/health".to_string(),
        }
    }
}

impl ApiConfig {
    /// Join the base URL and an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// History list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub page_size: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

/// Submission input rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Minimum trimmed length, in characters
    pub min_length: usize,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self { min_length: 10 }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        info!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Load configuration from the default location (.review-analyzer/config.yml)
    pub fn load_default() -> Result<Self> {
        Self::load(".review-analyzer/config.yml")
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            anyhow::bail!("api.base_url must not be empty");
        }
        if self.history.page_size == 0 {
            anyhow::bail!("history.page_size must be greater than zero");
        }
        if self.submission.min_length == 0 {
            anyhow::bail!("submission.min_length must be greater than zero");
        }
        Ok(())
    }
}
