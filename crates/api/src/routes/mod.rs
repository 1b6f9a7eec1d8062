pub mod contracts;
pub mod health;
pub mod results;

use axum::Router;

use crate::state::AppState;

/// Build the root route tree (upload and results endpoints).
///
/// Route hierarchy:
///
/// ```text
/// POST /upload-evm                   upload an EVM contract (multipart)
/// POST /upload-non-evm               upload a non-EVM contract (multipart)
/// GET  /results/{filename}           fetch an EVM test report
/// GET  /results/non-evm/{filename}   fetch a non-EVM test report
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Contract upload and test execution.
        .merge(contracts::router())
        // Test-report retrieval.
        .merge(results::router())
}
