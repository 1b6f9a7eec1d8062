//! Handlers for test-report retrieval.
//!
//! Reports are fetched from the runner by derived filename on every
//! request; responses are marked uncacheable so clients always see the
//! report from the latest upload.

use axum::extract::{Path, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use verdict_core::contract::ContractKind;
use verdict_core::naming;

use crate::error::AppResult;
use crate::state::AppState;

/// `Cache-Control` value for report responses.
const NO_CACHE: &str = "no-store, no-cache, must-revalidate, max-age=0";

/// Response payload for a report lookup.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// Contract filename the report was requested for.
    pub filename: String,
    /// Markdown report content.
    pub aggregated_report: String,
}

/// GET /results/{filename}
///
/// Fetches the aggregated EVM test report for a contract filename.
pub async fn evm_results(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    fetch_results(state, filename, ContractKind::Evm).await
}

/// GET /results/non-evm/{filename}
///
/// Fetches the aggregated non-EVM test report for a contract filename.
pub async fn non_evm_results(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    fetch_results(state, filename, ContractKind::NonEvm).await
}

/// Shared report lookup for both contract kinds.
async fn fetch_results(
    state: AppState,
    filename: String,
    kind: ContractKind,
) -> AppResult<Response> {
    let report_filename = naming::report_filename(&filename);
    let aggregated_report = state.runner.fetch_report(&report_filename, kind).await?;

    let mut response = Json(ReportResponse {
        filename,
        aggregated_report,
    })
    .into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));

    Ok(response)
}
