//! REST API client for the test-runner HTTP endpoints.
//!
//! Wraps the runner's container endpoints (file submission, test
//! execution, artifact retrieval) using [`reqwest`]:
//!
//! ```text
//! POST {base}/containers/{kind}/files             multipart upload, field `file`
//! POST {base}/containers/{kind}/tests             JSON {"filename"}, returns {"logs"}
//! GET  {base}/containers/{kind}/artifacts/{name}  artifact content as text
//! ```
//!
//! `{kind}` is the contract kind path segment, `evm` or `non-evm`.

use async_trait::async_trait;
use serde::Deserialize;
use verdict_core::contract::ContractKind;

use crate::runner::{ContractRunner, RunnerError};

/// HTTP client for a single runner instance.
pub struct RunnerApi {
    client: reqwest::Client,
    base_url: String,
}

/// Response returned by the runner's test-execution endpoint.
#[derive(Debug, Deserialize)]
struct TriggerResponse {
    /// Captured container logs for the run.
    logs: String,
}

impl RunnerApi {
    /// Create a new API client for a runner instance.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://host:8090`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`RunnerError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, RunnerError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RunnerError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RunnerError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Read a successful response body as text.
    async fn read_text(response: reqwest::Response) -> Result<String, RunnerError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.text().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), RunnerError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ContractRunner for RunnerApi {
    /// Submit a contract file to the kind's test container.
    ///
    /// Sends a `POST /containers/{kind}/files` multipart request with
    /// the bytes under the `file` field.
    async fn upload_contract(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        kind: ContractKind,
    ) -> Result<(), RunnerError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/containers/{}/files", self.base_url, kind))
            .multipart(form)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Execute the test suite for an uploaded contract.
    ///
    /// Sends a `POST /containers/{kind}/tests` request naming the file
    /// and returns the captured container logs.
    async fn trigger_test(
        &self,
        filename: &str,
        kind: ContractKind,
    ) -> Result<String, RunnerError> {
        let body = serde_json::json!({
            "filename": filename,
        });

        let response = self
            .client
            .post(format!("{}/containers/{}/tests", self.base_url, kind))
            .json(&body)
            .send()
            .await?;

        let trigger: TriggerResponse = Self::parse_response(response).await?;
        Ok(trigger.logs)
    }

    /// Fetch a generated artifact by filename.
    ///
    /// Sends a `GET /containers/{kind}/artifacts/{name}` request and
    /// returns the body as text.
    async fn fetch_report(
        &self,
        report_filename: &str,
        kind: ContractKind,
    ) -> Result<String, RunnerError> {
        let response = self
            .client
            .get(format!(
                "{}/containers/{}/artifacts/{}",
                self.base_url, kind, report_filename
            ))
            .send()
            .await?;

        Self::read_text(response).await
    }
}
