//! Request handlers for the contract test gateway.
//!
//! Each submodule provides async handler functions for one route group.
//! Handlers delegate to the artifact store and the remote runner client
//! and map errors via [`AppError`](crate::error::AppError).

pub mod contracts;
pub mod results;
