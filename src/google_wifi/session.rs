//! Credential Session
//!
//! A session is the bearer token issued for the configured refresh token plus the id
//! of the access point group it polls. It is built once at startup by [`bootstrap`]
//! and never refreshed: the token is assumed to stay valid for the process lifetime.

use crate::error::AuthError;
use crate::google_wifi::client::GoogleWifiClient;
use crate::google_wifi::types::{GroupsResponse, TokenResponse};
use secrecy::SecretString;
use serde_json::Value;
use tracing::{info, warn};

/// Authenticated handle on a single access point group
#[derive(Debug, Clone)]
pub struct Session {
    bearer_token: SecretString,
    group_id: String,
}

impl Session {
    pub fn new(bearer_token: SecretString, group_id: impl Into<String>) -> Self {
        Self {
            bearer_token,
            group_id: group_id.into(),
        }
    }

    pub fn bearer_token(&self) -> &SecretString {
        &self.bearer_token
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }
}

/// Exchange the refresh token for a bearer token and discover the group to poll.
///
/// Both steps run once, in order, without retry. There is no partial session: a
/// token without a group is useless, so either step failing fails the whole call.
pub async fn bootstrap(
    client: &GoogleWifiClient,
    refresh_token: &SecretString,
) -> Result<Session, AuthError> {
    info!("Requesting access token from OAuth endpoint");
    let bearer_token = client.issue_token(refresh_token).await?;
    info!("Access token issued");

    let group_id = client.first_group_id(&bearer_token).await?;
    info!("Using access point group {}", group_id);

    Ok(Session::new(bearer_token, group_id))
}

/// Extract the bearer token from an issuetoken response body
pub fn parse_token(body: &str) -> Result<SecretString, AuthError> {
    let response: TokenResponse =
        serde_json::from_str(body).map_err(|_| AuthError::TokenMissing)?;

    match response.token {
        Value::String(token) => Ok(SecretString::new(token.into())),
        _ => Err(AuthError::TokenMissing),
    }
}

/// Extract the id of the first group from a groups listing body.
///
/// Later groups are ignored; only single-group accounts are supported.
pub fn parse_first_group_id(body: &str) -> Result<String, AuthError> {
    let response: GroupsResponse =
        serde_json::from_str(body).map_err(|_| AuthError::NoGroupsFound)?;

    let groups = response.groups.as_array().ok_or(AuthError::NoGroupsFound)?;
    if groups.len() > 1 {
        warn!(
            "Account has {} access point groups, only the first is exported",
            groups.len()
        );
    }

    groups
        .first()
        .and_then(|group| group.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(AuthError::NoGroupsFound)
}
