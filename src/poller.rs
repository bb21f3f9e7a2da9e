//! Poll Loop
//!
//! A single background task that keeps the bandwidth gauges current.
//!
//! # Cycle
//!
//! 1. **Fetching**: request the group's realtime metrics, retrying failed attempts with
//!    exponential backoff (`max_retries`, starting at `retry_backoff_ms`)
//! 2. On success, overwrite the upload/download gauge of every reported device and
//!    stamp the success time
//! 3. **Idle**: sleep `poll_interval_seconds`, then start over
//!
//! # Error Handling
//!
//! A cycle that still fails after its retries sets `google_wifi_up` to 0 and bumps the
//! failure counter. With `exit_on_fetch_failure` (the default) the loop then returns the
//! error, which takes the whole process down; otherwise it waits for the next cycle and
//! the stale data stays visible through `google_wifi_last_success_age_seconds`.

use crate::config::MetricsConfig;
use crate::error::FetchError;
use crate::google_wifi::{DeviceMetric, GoogleWifiClient, Session};
use crate::metrics::MetricsCollector;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, warn};

/// Owns everything one poll cycle needs
pub struct Poller {
    client: GoogleWifiClient,
    session: Session,
    metrics: MetricsCollector,
    config: MetricsConfig,
}

impl Poller {
    pub fn new(
        client: GoogleWifiClient,
        session: Session,
        metrics: MetricsCollector,
        config: MetricsConfig,
    ) -> Self {
        Self {
            client,
            session,
            metrics,
            config,
        }
    }

    /// Run poll cycles until one fails fatally.
    ///
    /// Only returns when `exit_on_fetch_failure` is set and a cycle failed.
    pub async fn run(self) -> Result<(), FetchError> {
        let interval = Duration::from_secs(self.config.poll_interval_seconds);

        loop {
            if let Err(e) = self.poll_once().await {
                if self.config.exit_on_fetch_failure {
                    error!("Poll cycle failed, stopping exporter: {}", e);
                    return Err(e);
                }
                error!("Poll cycle failed, next attempt in {:?}: {}", interval, e);
            }

            sleep(interval).await;
        }
    }

    /// Run a single cycle and return the number of devices updated
    pub async fn poll_once(&self) -> Result<usize, FetchError> {
        debug!(
            "Polling realtime metrics for group {}",
            self.session.group_id()
        );

        match self.fetch_with_retry().await {
            Ok(records) => {
                self.metrics.apply(&records);
                self.metrics.record_success();
                debug!("Updated bandwidth metrics for {} devices", records.len());
                Ok(records.len())
            }
            Err(e) => {
                self.metrics.record_failure();
                Err(e)
            }
        }
    }

    async fn fetch_with_retry(&self) -> Result<Vec<DeviceMetric>, FetchError> {
        let mut backoff = Duration::from_millis(self.config.retry_backoff_ms);
        let mut attempt = 0;

        loop {
            match self.client.fetch_metrics(&self.session).await {
                Ok(records) => return Ok(records),
                Err(e) if attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        "Fetch attempt {}/{} failed: {}, retrying in {:?}",
                        attempt,
                        self.config.max_retries + 1,
                        e,
                        backoff
                    );
                    sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
