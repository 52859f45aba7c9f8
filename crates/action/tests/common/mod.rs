//! Shared fixtures: a fake Firebase backend and service-account keys.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};

use firewrite_action::ActionConfig;
use firewrite_core::{ActionInputs, ConfigError};
use firewrite_firebase::EmulatorHosts;

pub const PROJECT_ID: &str = "demo-project";
pub const CLIENT_EMAIL: &str = "writer@demo-project.iam.gserviceaccount.com";
pub const ACCESS_TOKEN: &str = "test-access-token";
pub const PRIVATE_KEY: &str = include_str!("../../../firebase/tests/fixtures/test_key.pem");

/// One request seen by the fake backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

struct FakeState {
    requests: Mutex<Vec<RecordedRequest>>,
    token_status: StatusCode,
    write_status: StatusCode,
}

/// An HTTP server standing in for the token endpoint and both databases.
///
/// `POST /token` answers the token exchange; every other request is
/// treated as a database write and answered with `write_status`.
pub struct FakeBackend {
    addr: SocketAddr,
    state: Arc<FakeState>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        Self::start_with(StatusCode::OK, StatusCode::OK).await
    }

    pub async fn start_with(token_status: StatusCode, write_status: StatusCode) -> Self {
        let state = Arc::new(FakeState {
            requests: Mutex::new(Vec::new()),
            token_status,
            write_status,
        });

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// `host:port`, as used by the emulator variables.
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    pub fn token_uri(&self) -> String {
        format!("{}/token", self.url())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn token_requests(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == "/token")
            .collect()
    }

    pub fn writes(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path != "/token")
            .collect()
    }
}

async fn handle(
    State(state): State<Arc<FakeState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    if method == Method::POST && path == "/token" {
        if !state.token_status.is_success() {
            return (
                state.token_status,
                Json(json!({"error": "invalid_grant", "error_description": "Invalid JWT Signature."})),
            )
                .into_response();
        }
        return Json(json!({
            "access_token": ACCESS_TOKEN,
            "expires_in": 3599,
            "token_type": "Bearer",
        }))
        .into_response();
    }

    if !state.write_status.is_success() {
        return (
            state.write_status,
            Json(json!({"error": "Permission denied"})),
        )
            .into_response();
    }
    (state.write_status, Json(Value::Null)).into_response()
}

/// Service-account key JSON signed with the test RSA key.
pub fn credentials_json(token_uri: &str) -> String {
    json!({
        "type": "service_account",
        "project_id": PROJECT_ID,
        "private_key_id": "test-key-id",
        "private_key": PRIVATE_KEY,
        "client_email": CLIENT_EMAIL,
        "client_id": "100000000000000000000",
        "token_uri": token_uri,
    })
    .to_string()
}

pub fn read_inputs(pairs: &[(&str, &str)]) -> Result<ActionInputs, ConfigError> {
    let source: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ActionInputs::read(&source)
}

pub fn config(pairs: &[(&str, &str)], emulators: EmulatorHosts) -> ActionConfig {
    ActionConfig {
        inputs: read_inputs(pairs).expect("inputs should resolve"),
        emulators,
    }
}
