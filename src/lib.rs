//! Google Wifi Prometheus Exporter
//!
//! Publishes the per-device bandwidth reported by a Google Wifi / Nest Wifi access
//! point group as Prometheus gauges.
//!
//! # Overview
//!
//! At startup the exporter trades a long-lived OAuth refresh token for a bearer token
//! and picks the first access point group on the account. A background task then polls
//! the group's realtime metrics every few seconds and overwrites one upload and one
//! download gauge per device, which Prometheus scrapes from `/metrics`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐      HTTPS/JSON      ┌──────────────┐
//! │ Google OAuth│ ◄─────────────────►  │   Exporter   │
//! │ AccessPoints│   bearer token       │              │
//! └─────────────┘                      │  ┌────────┐  │      HTTP      ┌────────────┐
//!                                      │  │ Poller │  │ ◄────────────► │ Prometheus │
//!                                      │  └────────┘  │   /metrics     └────────────┘
//!                                      │  ┌────────┐  │
//!                                      │  │Metrics │  │
//!                                      │  └────────┘  │
//!                                      └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`google_wifi`] - API client, session bootstrap and response parsing
//! - [`poller`] - Background poll loop
//! - [`metrics`] - Prometheus metric definitions
//! - [`server`] - Startup and HTTP server
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use google_wifi_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod google_wifi;
pub mod metrics;
pub mod poller;
pub mod server;
