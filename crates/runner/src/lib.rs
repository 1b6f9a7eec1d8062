//! Client for the remote contract test-runner service.
//!
//! The runner is a black box that manages Docker test containers. This
//! crate wraps its HTTP API behind the [`ContractRunner`] trait so the
//! gateway can be exercised without a live runner.

pub mod api;
pub mod runner;

pub use api::RunnerApi;
pub use runner::{ContractRunner, RunnerError};
