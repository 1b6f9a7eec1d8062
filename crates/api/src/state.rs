use std::sync::Arc;

use verdict_core::artifacts::ArtifactStore;
use verdict_runner::ContractRunner;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Local store for uploaded contracts and fetched reports.
    pub store: Arc<ArtifactStore>,
    /// Client for the remote test-runner service.
    pub runner: Arc<dyn ContractRunner>,
}
