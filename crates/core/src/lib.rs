//! Core domain types for the contract test gateway.
//!
//! Contract kinds and their extension allow-sets, the naming rules that
//! tie uploads to their generated reports, and the local artifact store
//! that keeps the most recent upload and report per contract.

pub mod artifacts;
pub mod contract;
pub mod error;
pub mod naming;
