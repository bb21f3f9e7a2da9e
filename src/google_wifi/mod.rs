pub mod client;
pub mod session;
pub mod telemetry;
pub mod types;

pub use client::GoogleWifiClient;
pub use session::{bootstrap, Session};
pub use types::DeviceMetric;
