//! Realtime Metrics Parsing
//!
//! Turns a `realtimeMetrics` response body into [`DeviceMetric`] records.
//!
//! ```text
//! { "stationMetrics": [
//!     { "station": { "friendlyName": "phone" },
//!       "traffic": { "transmitSpeedBps": "100", "receiveSpeedBps": "200" } } ] }
//! ```
//!
//! The speeds arrive as decimal strings, not JSON numbers.
//!
//! # Per-entry handling
//!
//! | Entry shape                          | Outcome                         |
//! |--------------------------------------|---------------------------------|
//! | no string `station.friendlyName`     | skipped, warning                |
//! | no `traffic` object                  | skipped, warning                |
//! | speed field absent or not a string   | speed reported as 0             |
//! | speed string not an unsigned integer | whole fetch fails (`SpeedParse`) |

use crate::error::FetchError;
use crate::google_wifi::types::DeviceMetric;
use serde_json::Value;
use tracing::{debug, warn};

enum Station {
    Metric(DeviceMetric),
    MissingTraffic(String),
    Malformed,
}

/// Parse a realtime metrics body into one record per station with traffic
pub fn parse_realtime_metrics(body: &str) -> Result<Vec<DeviceMetric>, FetchError> {
    let response: Value = serde_json::from_str(body)?;

    let entries = response
        .get("stationMetrics")
        .and_then(Value::as_array)
        .ok_or(FetchError::NoStationMetrics)?;

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match parse_station(entry)? {
            Station::Metric(metric) => records.push(metric),
            Station::MissingTraffic(device) => {
                warn!("No traffic reported for device {}, skipping", device);
            }
            Station::Malformed => {
                warn!(
                    "Station entry {} has no friendlyName, skipping: {}",
                    index, entry
                );
            }
        }
    }

    debug!(
        "Parsed {} device records from {} station entries",
        records.len(),
        entries.len()
    );
    Ok(records)
}

fn parse_station(entry: &Value) -> Result<Station, FetchError> {
    let Some(device_id) = entry
        .get("station")
        .and_then(|station| station.get("friendlyName"))
        .and_then(Value::as_str)
    else {
        return Ok(Station::Malformed);
    };

    let Some(traffic) = entry.get("traffic").filter(|t| t.is_object()) else {
        return Ok(Station::MissingTraffic(device_id.to_string()));
    };

    Ok(Station::Metric(DeviceMetric {
        device_id: device_id.to_string(),
        transmit_bps: speed_field(traffic, "transmitSpeedBps", device_id)?,
        receive_bps: speed_field(traffic, "receiveSpeedBps", device_id)?,
    }))
}

fn speed_field(traffic: &Value, field: &'static str, device: &str) -> Result<u64, FetchError> {
    match traffic.get(field).and_then(Value::as_str) {
        Some(raw) => raw.parse().map_err(|_| FetchError::SpeedParse {
            device: device.to_string(),
            field,
            value: raw.to_string(),
        }),
        None => Ok(0),
    }
}
