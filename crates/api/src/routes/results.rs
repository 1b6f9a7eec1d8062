//! Route definitions for test-report retrieval.

use axum::routing::get;
use axum::Router;

use crate::handlers::results;
use crate::state::AppState;

/// Report retrieval routes mounted at the root.
///
/// ```text
/// GET /results/{filename}           -> evm_results
/// GET /results/non-evm/{filename}   -> non_evm_results
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/results/{filename}", get(results::evm_results))
        .route("/results/non-evm/{filename}", get(results::non_evm_results))
}
