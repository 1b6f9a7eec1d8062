//! Trait boundary for the remote test-runner service.

use async_trait::async_trait;
use verdict_core::contract::ContractKind;

/// Errors from the runner client layer.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The runner returned a non-2xx status code.
    #[error("Runner API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Operations offered by the remote test runner.
///
/// The runner accepts contract files, executes the matching test
/// container, and serves generated artifacts by name. The production
/// implementation is [`RunnerApi`](crate::api::RunnerApi); tests
/// substitute their own.
#[async_trait]
pub trait ContractRunner: Send + Sync {
    /// Submit contract source bytes under the given filename.
    async fn upload_contract(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        kind: ContractKind,
    ) -> Result<(), RunnerError>;

    /// Execute the test suite for a previously uploaded contract and
    /// return the captured container logs.
    async fn trigger_test(
        &self,
        filename: &str,
        kind: ContractKind,
    ) -> Result<String, RunnerError>;

    /// Fetch a generated artifact by filename.
    async fn fetch_report(
        &self,
        report_filename: &str,
        kind: ContractKind,
    ) -> Result<String, RunnerError>;
}
