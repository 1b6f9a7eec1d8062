use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use verdict_api::config::ServerConfig;
use verdict_api::routes;
use verdict_api::state::AppState;
use verdict_core::artifacts::ArtifactStore;
use verdict_core::contract::ContractKind;
use verdict_runner::{ContractRunner, RunnerError};

/// One recorded call against the [`StubRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerCall {
    Upload { filename: String, kind: ContractKind },
    Trigger { filename: String, kind: ContractKind },
    Fetch { report: String, kind: ContractKind },
}

/// In-memory stand-in for the remote test-runner service.
///
/// Records every call so tests can assert on the exact sequence and
/// arguments, and returns canned logs/report content.
pub struct StubRunner {
    pub calls: Mutex<Vec<RunnerCall>>,
    pub logs: String,
    pub report: String,
    pub fail_fetch: bool,
}

impl StubRunner {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            logs: "All tests passed".to_string(),
            report: "# Aggregated Report\n\nAll checks green.".to_string(),
            fail_fetch: false,
        }
    }

    /// Stub whose report fetches fail with a runner API error.
    pub fn failing_fetch() -> Self {
        Self {
            fail_fetch: true,
            ..Self::new()
        }
    }

    /// Snapshot of the recorded calls.
    pub fn recorded_calls(&self) -> Vec<RunnerCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContractRunner for StubRunner {
    async fn upload_contract(
        &self,
        _bytes: Vec<u8>,
        filename: &str,
        kind: ContractKind,
    ) -> Result<(), RunnerError> {
        self.calls.lock().unwrap().push(RunnerCall::Upload {
            filename: filename.to_string(),
            kind,
        });
        Ok(())
    }

    async fn trigger_test(
        &self,
        filename: &str,
        kind: ContractKind,
    ) -> Result<String, RunnerError> {
        self.calls.lock().unwrap().push(RunnerCall::Trigger {
            filename: filename.to_string(),
            kind,
        });
        Ok(self.logs.clone())
    }

    async fn fetch_report(
        &self,
        report_filename: &str,
        kind: ContractKind,
    ) -> Result<String, RunnerError> {
        self.calls.lock().unwrap().push(RunnerCall::Fetch {
            report: report_filename.to_string(),
            kind,
        });
        if self.fail_fetch {
            return Err(RunnerError::ApiError {
                status: 500,
                body: "container exploded".to_string(),
            });
        }
        Ok(self.report.clone())
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout. Artifacts are stored under `data_dir`.
pub fn test_config(data_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        runner_url: "http://localhost:8090".to_string(),
        data_dir: data_dir.to_string_lossy().to_string(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given artifact directory and runner stub.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(data_dir: &Path, runner: Arc<StubRunner>) -> Router {
    let config = test_config(data_dir);

    let state = AppState {
        config: Arc::new(config),
        store: Arc::new(ArtifactStore::new(data_dir)),
        runner,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Send a GET request to the app and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Build a multipart POST request with a single file field.
pub fn multipart_file_request(
    uri: &str,
    field_name: &str,
    filename: &str,
    bytes: &[u8],
) -> Request<Body> {
    let boundary = "ZnVsbC1zdGFjay10ZXN0";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Build a multipart POST request with a single plain-text field (no
/// filename), for exercising non-file field handling.
pub fn multipart_text_request(uri: &str, field_name: &str, value: &str) -> Request<Body> {
    let boundary = "ZnVsbC1zdGFjay10ZXN0";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field_name}\"\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(value.as_bytes());
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}
