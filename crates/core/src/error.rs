//! Domain error type shared across the workspace.

/// Errors produced by core domain logic.
///
/// HTTP layers map these onto status codes; the `Validation` message is
/// client-facing, the `Internal` message is not.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input failed a domain validation rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An unexpected internal failure (I/O and the like).
    #[error("Internal error: {0}")]
    Internal(String),
}
