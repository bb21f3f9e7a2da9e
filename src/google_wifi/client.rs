//! Google Wifi REST API Client
//!
//! Thin wrapper around a `reqwest::Client` for the three endpoints the exporter uses:
//!
//! - **Token exchange**: `POST {oauth_url}` with the refresh token as bearer credential
//!   and a fixed set of query parameters identifying the Google Wifi app
//! - **Group discovery**: `GET {api_url}/groups`
//! - **Realtime metrics**: `GET {api_url}/groups/{group_id}/realtimeMetrics`
//!
//! Response bodies are handed to the parsers in [`crate::google_wifi::session`] and
//! [`crate::google_wifi::telemetry`].
//!
//! # Example
//!
//! ```no_run
//! use google_wifi_exporter::config::GoogleWifiConfig;
//! use google_wifi_exporter::google_wifi::{bootstrap, GoogleWifiClient};
//! use secrecy::SecretString;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = GoogleWifiClient::new(&GoogleWifiConfig::default())?;
//! let session = bootstrap(&client, &SecretString::from("refresh-token")).await?;
//! let devices = client.fetch_metrics(&session).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::GoogleWifiConfig;
use crate::error::{AuthError, ExporterError, FetchError, Result};
use crate::google_wifi::session::{parse_first_group_id, parse_token, Session};
use crate::google_wifi::telemetry::parse_realtime_metrics;
use crate::google_wifi::types::DeviceMetric;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::debug;

/// Query string the OAuth endpoint expects from the Google Wifi app
const ISSUE_TOKEN_PARAMS: [(&str, &str); 6] = [
    ("app_id", "com.google.OnHub"),
    (
        "client_id",
        "586698244315-vc96jg3mn4nap78iir799fc2ll3rk18s.apps.googleusercontent.com",
    ),
    ("hl", "en-US"),
    ("lib_ver", "3.3"),
    ("response_type", "token"),
    (
        "scope",
        "https://www.googleapis.com/auth/accesspoints https://www.googleapis.com/auth/clouddevices",
    ),
];

/// Client for the Google OAuth and Access Points APIs
pub struct GoogleWifiClient {
    http: reqwest::Client,
    oauth_url: String,
    api_url: String,
}

impl GoogleWifiClient {
    pub fn new(config: &GoogleWifiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("google-wifi-exporter/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder
            .build()
            .map_err(|e| ExporterError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            oauth_url: config.oauth_url.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Exchange the refresh token for a short-lived bearer token
    pub async fn issue_token(
        &self,
        refresh_token: &SecretString,
    ) -> std::result::Result<SecretString, AuthError> {
        let response = self
            .http
            .post(&self.oauth_url)
            .query(&ISSUE_TOKEN_PARAMS)
            .bearer_auth(refresh_token.expose_secret())
            .header(reqwest::header::CONTENT_LENGTH, "0")
            .send()
            .await
            .map_err(|e| AuthError::TokenRequestFailed(e.to_string()))?;

        let status = response.status();
        debug!("issuetoken status {}", status);
        if !status.is_success() {
            return Err(AuthError::TokenRequestFailed(format!("HTTP status {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AuthError::TokenRequestFailed(e.to_string()))?;

        parse_token(&body)
    }

    /// Id of the first access point group visible to the token
    pub async fn first_group_id(
        &self,
        bearer_token: &SecretString,
    ) -> std::result::Result<String, AuthError> {
        let response = self
            .http
            .get(format!("{}/groups", self.api_url))
            .bearer_auth(bearer_token.expose_secret())
            .send()
            .await
            .map_err(|e| AuthError::GroupsRequestFailed(e.to_string()))?;

        let status = response.status();
        debug!("groups status {}", status);
        if !status.is_success() {
            return Err(AuthError::GroupsRequestFailed(format!(
                "HTTP status {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AuthError::GroupsRequestFailed(e.to_string()))?;

        parse_first_group_id(&body)
    }

    /// Fetch the current per-device bandwidth of the session's group
    pub async fn fetch_metrics(
        &self,
        session: &Session,
    ) -> std::result::Result<Vec<DeviceMetric>, FetchError> {
        let response = self
            .http
            .get(format!(
                "{}/groups/{}/realtimeMetrics",
                self.api_url,
                session.group_id()
            ))
            .bearer_auth(session.bearer_token().expose_secret())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        parse_realtime_metrics(&body)
    }
}
