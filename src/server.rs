//! HTTP Server and Bootstrap
//!
//! This module wires the exporter together and serves the scrape endpoint.
//!
//! # Startup
//!
//! 1. Validate the configuration
//! 2. Bootstrap the credential session (token exchange, then group discovery);
//!    any failure here is returned and ends the process
//! 3. Spawn the [`Poller`] background task
//! 4. Serve HTTP until the server or the poller stops
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page with links to metrics and health
//! - `GET /metrics` - Prometheus metrics in text format
//! - `GET /health` - Health check (returns 200 if the last poll succeeded, 503 otherwise)

use crate::config::Config;
use crate::error::ExporterError;
use crate::google_wifi::{bootstrap, GoogleWifiClient};
use crate::metrics::MetricsCollector;
use crate::poller::Poller;
use anyhow::Context;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::future::IntoFuture;
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    metrics: MetricsCollector,
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    let refresh_token = config
        .google_wifi
        .refresh_token
        .clone()
        .ok_or_else(|| ExporterError::Config("refresh token is required".to_string()))?;

    let metrics = MetricsCollector::new()?;
    let client = GoogleWifiClient::new(&config.google_wifi)?;

    let session = bootstrap(&client, &refresh_token)
        .await
        .context("Failed to bootstrap Google Wifi session")?;

    let poller = Poller::new(client, session, metrics.clone(), config.metrics.clone());
    let poll_task = tokio::spawn(poller.run());

    let app = router(metrics);

    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Metrics server listening on {}", addr);
    info!("Metrics available at http://{}/metrics", addr);

    tokio::select! {
        result = axum::serve(listener, app).into_future() => {
            result.map_err(|e| ExporterError::Server(e.to_string()))?;
        }
        result = poll_task => {
            match result {
                Ok(Ok(())) => anyhow::bail!("Poll loop stopped unexpectedly"),
                Ok(Err(e)) => return Err(ExporterError::Fetch(e).into()),
                Err(e) => anyhow::bail!("Poll loop panicked: {}", e),
            }
        }
    }

    Ok(())
}

/// Build the scrape router over a metrics collector
pub fn router(metrics: MetricsCollector) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(AppState { metrics })
}

async fn root_handler() -> impl IntoResponse {
    axum::response::Html(
        r#"<html>
<head><title>Google Wifi Exporter</title></head>
<body>
<h1>Google Wifi Prometheus Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#,
    )
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(metrics) => metrics.into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.metrics.up.get() > 0.0 {
        (axum::http::StatusCode::OK, "OK")
    } else {
        (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            "Google Wifi API unreachable",
        )
    }
}
