use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::ExporterError;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub google_wifi: GoogleWifiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GoogleWifiConfig {
    /// Usually supplied through `GW_REFRESH_TOKEN` rather than the file.
    #[serde(default)]
    pub refresh_token: Option<SecretString>,
    #[serde(default = "default_oauth_url")]
    pub oauth_url: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    #[serde(default = "default_true")]
    pub exit_on_fetch_failure: bool,
}

fn default_oauth_url() -> String {
    "https://oauthaccountmanager.googleapis.com/v1/issuetoken".to_string()
}

fn default_api_url() -> String {
    "https://accesspoints.googleapis.com/v2".to_string()
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    2112
}

fn default_poll_interval() -> u64 {
    5
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_true() -> bool {
    true
}

impl Default for GoogleWifiConfig {
    fn default() -> Self {
        Self {
            refresh_token: None,
            oauth_url: default_oauth_url(),
            api_url: default_api_url(),
            request_timeout_seconds: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            exit_on_fetch_failure: default_true(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("GOOGLE_WIFI_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Checks the settings that have no usable default.
    pub fn validate(&self) -> std::result::Result<(), ExporterError> {
        match &self.google_wifi.refresh_token {
            Some(token) if !token.expose_secret().trim().is_empty() => {}
            _ => {
                return Err(ExporterError::Config(
                    "refresh token is required (set GW_REFRESH_TOKEN)".to_string(),
                ))
            }
        }

        if self.metrics.poll_interval_seconds == 0 {
            return Err(ExporterError::Config(
                "poll_interval_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
