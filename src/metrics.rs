//! Prometheus Metrics Definitions
//!
//! This module defines all Prometheus metrics exposed by the Google Wifi exporter.
//!
//! # Bandwidth
//! - `google_wifi_bandwidth_upload{deviceId}` - Current transmit speed in bits per second
//! - `google_wifi_bandwidth_download{deviceId}` - Current receive speed in bits per second
//!
//! Devices missing from a poll keep their last value; series are never removed.
//!
//! # Exporter Health
//! - `google_wifi_up` - 1 if the last poll cycle succeeded
//! - `google_wifi_last_success_timestamp_seconds` - Unix time of the last successful poll
//! - `google_wifi_last_success_age_seconds` - Seconds since the last successful poll,
//!   refreshed on every render (-1 until the first success)
//! - `google_wifi_poll_failures_total` - Poll cycles that failed after all retries

use crate::google_wifi::DeviceMetric;
use prometheus::{Encoder, Gauge, GaugeVec, IntCounter, Opts, Registry, TextEncoder};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

const NAMESPACE: &str = "google_wifi";

/// Label carrying the vendor-assigned friendly name of a station.
pub const DEVICE_LABEL: &str = "deviceId";

/// Metrics collector for the Google Wifi exporter
#[derive(Clone)]
pub struct MetricsCollector {
    registry: Arc<Registry>,

    // Bandwidth metrics
    pub bandwidth_upload: Arc<GaugeVec>,
    pub bandwidth_download: Arc<GaugeVec>,

    // Exporter health
    pub up: Arc<Gauge>,
    pub last_success_timestamp_seconds: Arc<Gauge>,
    pub last_success_age_seconds: Arc<Gauge>,
    pub poll_failures_total: Arc<IntCounter>,
}

impl MetricsCollector {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let bandwidth_upload = GaugeVec::new(
            Opts::new("upload", "Current upload speed of the device in bits per second")
                .namespace(NAMESPACE)
                .subsystem("bandwidth"),
            &[DEVICE_LABEL],
        )?;

        let bandwidth_download = GaugeVec::new(
            Opts::new(
                "download",
                "Current download speed of the device in bits per second",
            )
            .namespace(NAMESPACE)
            .subsystem("bandwidth"),
            &[DEVICE_LABEL],
        )?;

        let up = Gauge::with_opts(
            Opts::new("up", "Whether the last poll of the Google Wifi API succeeded")
                .namespace(NAMESPACE),
        )?;

        let last_success_timestamp_seconds = Gauge::with_opts(
            Opts::new(
                "last_success_timestamp_seconds",
                "Unix timestamp of the last successful poll",
            )
            .namespace(NAMESPACE),
        )?;

        let last_success_age_seconds = Gauge::with_opts(
            Opts::new(
                "last_success_age_seconds",
                "Seconds since the last successful poll (-1 if none yet)",
            )
            .namespace(NAMESPACE),
        )?;
        last_success_age_seconds.set(-1.0);

        let poll_failures_total = IntCounter::with_opts(
            Opts::new(
                "poll_failures_total",
                "Poll cycles that failed after exhausting retries",
            )
            .namespace(NAMESPACE),
        )?;

        registry.register(Box::new(bandwidth_upload.clone()))?;
        registry.register(Box::new(bandwidth_download.clone()))?;
        registry.register(Box::new(up.clone()))?;
        registry.register(Box::new(last_success_timestamp_seconds.clone()))?;
        registry.register(Box::new(last_success_age_seconds.clone()))?;
        registry.register(Box::new(poll_failures_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            bandwidth_upload: Arc::new(bandwidth_upload),
            bandwidth_download: Arc::new(bandwidth_download),
            up: Arc::new(up),
            last_success_timestamp_seconds: Arc::new(last_success_timestamp_seconds),
            last_success_age_seconds: Arc::new(last_success_age_seconds),
            poll_failures_total: Arc::new(poll_failures_total),
        })
    }

    /// Overwrite the bandwidth gauges with one poll's records.
    pub fn apply(&self, records: &[DeviceMetric]) {
        for record in records {
            self.bandwidth_upload
                .with_label_values(&[record.device_id.as_str()])
                .set(record.transmit_bps as f64);
            self.bandwidth_download
                .with_label_values(&[record.device_id.as_str()])
                .set(record.receive_bps as f64);
        }
    }

    /// Mark a successful poll cycle at the current time
    pub fn record_success(&self) {
        self.up.set(1.0);
        self.last_success_timestamp_seconds.set(unix_now());
    }

    /// Mark a poll cycle that failed after all retries
    pub fn record_failure(&self) {
        self.up.set(0.0);
        self.poll_failures_total.inc();
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        self.refresh_age();

        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    fn refresh_age(&self) {
        let last = self.last_success_timestamp_seconds.get();
        if last > 0.0 {
            self.last_success_age_seconds
                .set((unix_now() - last).max(0.0));
        }
    }
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}
