//! Handlers for contract upload and test execution.
//!
//! Both endpoints accept a multipart form with a required `contract_file`
//! field, validate its extension against the kind's allow-set, clear
//! stale local artifacts, forward the file to the remote runner, execute
//! the test suite, and fetch the generated report.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use verdict_core::contract::{self, ContractKind};
use verdict_core::naming;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart field carrying the contract source file.
const CONTRACT_FILE_FIELD: &str = "contract_file";

/// Response payload for a processed upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Original (client-supplied) filename.
    pub filename: String,
    /// Captured container logs from the test run.
    pub docker_logs: String,
    /// Markdown report fetched from the runner.
    pub aggregated_report: String,
    /// Processing details.
    pub details: UploadDetails,
}

/// Nested detail block of [`UploadResponse`].
#[derive(Debug, Serialize)]
pub struct UploadDetails {
    /// Contract kind, `evm` or `non-evm`.
    pub contract_type: ContractKind,
    /// Original (client-supplied) filename.
    pub filename: String,
    /// Processing status; always `processed` on success.
    pub status: &'static str,
}

/// POST /upload-evm
///
/// Accepts a multipart form with a required `contract_file` field
/// (`.sol` or `.txt`), runs the EVM test suite for it, and returns the
/// logs and aggregated report.
pub async fn upload_evm(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    process_upload(state, multipart, ContractKind::Evm).await
}

/// POST /upload-non-evm
///
/// Accepts a multipart form with a required `contract_file` field
/// (`.rs` or `.wasm`), runs the non-EVM test suite for it, and returns
/// the logs and aggregated report.
pub async fn upload_non_evm(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    process_upload(state, multipart, ContractKind::NonEvm).await
}

/// Shared upload pipeline for both contract kinds.
async fn process_upload(
    state: AppState,
    mut multipart: Multipart,
    kind: ContractKind,
) -> AppResult<Json<UploadResponse>> {
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            CONTRACT_FILE_FIELD => {
                let filename = match field.file_name() {
                    Some(f) => f.to_string(),
                    None => {
                        return Err(AppError::BadRequest(format!(
                            "Field '{CONTRACT_FILE_FIELD}' must be a file"
                        )))
                    }
                };
                // Reject disallowed extensions before buffering the body.
                contract::validate_extension(&filename, kind)?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file_data = Some((filename, data.to_vec()));
            }
            _ => {} // ignore unknown fields
        }
    }

    let (filename, data) = file_data.ok_or_else(|| {
        AppError::BadRequest(format!("Missing required '{CONTRACT_FILE_FIELD}' field"))
    })?;

    let base_name = naming::base_name(&filename);

    // Serialize cleanup + processing for this contract name.
    let _guard = state.store.lock(kind, &base_name).await;

    // Clear stale artifacts from earlier uploads of the same contract.
    state.store.purge(kind, &base_name).await;

    // Keep a local copy; failure here must not fail the upload.
    if let Err(e) = state.store.save_contract(kind, &filename, &data).await {
        tracing::warn!(error = %e, filename = %filename, "Failed to store local contract copy");
    }

    state.runner.upload_contract(data, &filename, kind).await?;

    let docker_logs = state.runner.trigger_test(&filename, kind).await?;

    let report_filename = naming::report_filename(&filename);
    let aggregated_report = state.runner.fetch_report(&report_filename, kind).await?;

    if let Err(e) = state
        .store
        .save_report(kind, &report_filename, &aggregated_report)
        .await
    {
        tracing::warn!(error = %e, report = %report_filename, "Failed to store local report copy");
    }

    tracing::info!(
        filename = %filename,
        kind = %kind,
        report = %report_filename,
        "Contract processed"
    );

    Ok(Json(UploadResponse {
        message: format!("{} contract processed", kind.label()),
        filename: filename.clone(),
        docker_logs,
        aggregated_report,
        details: UploadDetails {
            contract_type: kind,
            filename,
            status: "processed",
        },
    }))
}
