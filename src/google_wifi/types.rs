//! Google Wifi API Type Definitions
//!
//! The OAuth and Access Points APIs are undocumented third-party contracts, so the
//! response types here keep every vendor field as a loosely typed `serde_json::Value`
//! and the callers pull typed values out with explicit accessors. A wrong-typed field
//! in one entry then costs that entry instead of the whole response.
//!
//! # API Endpoints Covered
//!
//! - `POST /v1/issuetoken` → [`TokenResponse`]
//! - `GET /v2/groups` → [`GroupsResponse`]
//! - `GET /v2/groups/{id}/realtimeMetrics` → station entries, see
//!   [`crate::google_wifi::telemetry`]

use serde::Deserialize;
use serde_json::Value;

/// Response of the OAuth issuetoken endpoint
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Value,
}

/// Response of the group listing endpoint
#[derive(Debug, Deserialize)]
pub struct GroupsResponse {
    #[serde(default)]
    pub groups: Value,
}

/// Bandwidth reading for one station, built fresh on every poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMetric {
    /// Vendor-assigned friendly name; neither unique nor stable
    pub device_id: String,
    pub transmit_bps: u64,
    pub receive_bps: u64,
}
