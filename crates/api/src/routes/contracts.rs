//! Route definitions for contract uploads.

use axum::routing::post;
use axum::Router;

use crate::handlers::contracts;
use crate::state::AppState;

/// Contract upload routes mounted at the root.
///
/// ```text
/// POST /upload-evm       -> upload_evm
/// POST /upload-non-evm   -> upload_non_evm
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload-evm", post(contracts::upload_evm))
        .route("/upload-non-evm", post(contracts::upload_non_evm))
}
