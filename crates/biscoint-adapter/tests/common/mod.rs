/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and transport doubles
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for biscoint-adapter tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use biscoint_adapter::{
    BiscointClient, ClientConfig, Credentials, FixedClock, HttpRequest, HttpResponse,
    HttpTransport, TransportError,
};
use chrono::{DateTime, Utc};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "K";
pub const TEST_API_SECRET: &str = "S";
pub const FIXED_MILLIS: i64 = 1_700_000_000_000;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_API_KEY, TEST_API_SECRET).expect("test credentials")
}

pub fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(FIXED_MILLIS).expect("valid timestamp")
}

/// Client against a wiremock server, signing with the test credentials
pub fn wiremock_client(server: &MockServer) -> BiscointClient {
    BiscointClient::with_config(ClientConfig {
        base_url: server.uri(),
        ..ClientConfig::default()
    })
    .expect("client init")
    .with_credentials(test_credentials())
    .expect("signer init")
}

/// Transport double that records requests and replays one canned outcome
pub struct RecordingTransport {
    outcome: Result<HttpResponse, TransportError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn responding(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(HttpResponse {
                status,
                headers: vec![("content-type".to_string(), "application/json".to_string())],
                body: body.as_bytes().to_vec(),
            }),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: TransportError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(err),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().expect("requests lock").push(request);
        self.outcome.clone()
    }
}

/// Client over a recording transport with a frozen clock
pub fn recording_client(transport: Arc<RecordingTransport>) -> BiscointClient {
    recording_client_with(transport, test_credentials())
}

pub fn recording_client_with(
    transport: Arc<RecordingTransport>,
    credentials: Credentials,
) -> BiscointClient {
    BiscointClient::with_transport("https://api.biscoint.io", transport)
        .expect("client init")
        .with_credentials(credentials)
        .expect("signer init")
        .with_clock(Arc::new(FixedClock(fixed_now())))
}
