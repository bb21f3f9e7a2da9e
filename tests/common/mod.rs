//! In-process stand-in for the Google OAuth and Access Points APIs.
//!
//! Serves canned responses on an ephemeral localhost port and records what the
//! exporter sent, so tests can drive the real `reqwest` client end to end.

#![allow(dead_code)]

use axum::{
    extract::{Path, RawQuery, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use google_wifi_exporter::config::{GoogleWifiConfig, MetricsConfig};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

pub const PHONE_METRICS: &str = r#"{"stationMetrics":[{"station":{"friendlyName":"phone"},"traffic":{"transmitSpeedBps":"100","receiveSpeedBps":"200"}}]}"#;

#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

#[derive(Default)]
struct Seen {
    token_auth: Option<String>,
    token_query: Option<String>,
    groups_auth: Option<String>,
    metrics_auth: Option<String>,
    metrics_group: Option<String>,
    metrics_calls: usize,
}

struct Inner {
    token: Mutex<Reply>,
    groups: Mutex<Reply>,
    // The last reply is repeated once the queue is down to one entry.
    realtime: Mutex<VecDeque<Reply>>,
    seen: Mutex<Seen>,
}

#[derive(Clone)]
pub struct FakeApi {
    inner: Arc<Inner>,
}

impl FakeApi {
    /// A healthy account: token `abc`, one group `g1`, one station `phone`
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                token: Mutex::new(Reply::ok(r#"{"token":"abc"}"#)),
                groups: Mutex::new(Reply::ok(r#"{"groups":[{"id":"g1"}]}"#)),
                realtime: Mutex::new(VecDeque::from([Reply::ok(PHONE_METRICS)])),
                seen: Mutex::new(Seen::default()),
            }),
        }
    }

    pub fn with_token(self, reply: Reply) -> Self {
        *self.inner.token.lock().unwrap() = reply;
        self
    }

    pub fn with_groups(self, reply: Reply) -> Self {
        *self.inner.groups.lock().unwrap() = reply;
        self
    }

    pub fn with_realtime(self, replies: Vec<Reply>) -> Self {
        self.set_realtime(replies);
        self
    }

    pub fn set_realtime(&self, replies: Vec<Reply>) {
        *self.inner.realtime.lock().unwrap() = replies.into();
    }

    pub fn token_auth(&self) -> Option<String> {
        self.inner.seen.lock().unwrap().token_auth.clone()
    }

    pub fn token_query(&self) -> Option<String> {
        self.inner.seen.lock().unwrap().token_query.clone()
    }

    pub fn groups_auth(&self) -> Option<String> {
        self.inner.seen.lock().unwrap().groups_auth.clone()
    }

    pub fn metrics_auth(&self) -> Option<String> {
        self.inner.seen.lock().unwrap().metrics_auth.clone()
    }

    pub fn metrics_group(&self) -> Option<String> {
        self.inner.seen.lock().unwrap().metrics_group.clone()
    }

    pub fn metrics_calls(&self) -> usize {
        self.inner.seen.lock().unwrap().metrics_calls
    }

    /// Serve the fake API and return client settings pointing at it
    pub async fn spawn(&self) -> GoogleWifiConfig {
        let app = Router::new()
            .route("/v1/issuetoken", post(issue_token))
            .route("/v2/groups", get(groups))
            .route("/v2/groups/{group_id}/realtimeMetrics", get(realtime_metrics))
            .with_state(self.clone());

        let addr = serve(app).await;

        GoogleWifiConfig {
            refresh_token: None,
            oauth_url: format!("http://{}/v1/issuetoken", addr),
            api_url: format!("http://{}/v2", addr),
            request_timeout_seconds: Some(5),
        }
    }
}

/// Serve a router on an ephemeral localhost port
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    addr
}

/// Poll settings that keep tests fast
pub fn fast_metrics_config(max_retries: u32) -> MetricsConfig {
    MetricsConfig {
        poll_interval_seconds: 1,
        max_retries,
        retry_backoff_ms: 1,
        exit_on_fetch_failure: true,
    }
}

fn auth_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn issue_token(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> (StatusCode, String) {
    {
        let mut seen = api.inner.seen.lock().unwrap();
        seen.token_auth = auth_header(&headers);
        seen.token_query = query;
    }
    let reply = api.inner.token.lock().unwrap().clone();
    (reply.status, reply.body)
}

async fn groups(State(api): State<FakeApi>, headers: HeaderMap) -> (StatusCode, String) {
    api.inner.seen.lock().unwrap().groups_auth = auth_header(&headers);
    let reply = api.inner.groups.lock().unwrap().clone();
    (reply.status, reply.body)
}

async fn realtime_metrics(
    State(api): State<FakeApi>,
    Path(group_id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    {
        let mut seen = api.inner.seen.lock().unwrap();
        seen.metrics_auth = auth_header(&headers);
        seen.metrics_group = Some(group_id);
        seen.metrics_calls += 1;
    }

    let mut queue = api.inner.realtime.lock().unwrap();
    let reply = if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
    .unwrap_or_else(|| Reply::status(StatusCode::NOT_FOUND));

    (reply.status, reply.body)
}
