use thiserror::Error;

/// Failures while establishing the credential session.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token request failed: {0}")]
    TokenRequestFailed(String),

    #[error("Token missing from issuetoken response")]
    TokenMissing,

    #[error("Groups request failed: {0}")]
    GroupsRequestFailed(String),

    #[error("No access point groups found for this account")]
    NoGroupsFound,
}

/// Failures of a single realtime metrics fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Realtime metrics request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Realtime metrics returned HTTP status {0}")]
    HttpStatus(u16),

    #[error("Realtime metrics response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Realtime metrics response has no stationMetrics list")]
    NoStationMetrics,

    #[error("Invalid {field} value {value:?} for device {device}")]
    SpeedParse {
        device: String,
        field: &'static str,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExporterError>;
