//! Contract kinds and upload validation.
//!
//! Two target families are supported: EVM contracts (Solidity-style
//! sources) and non-EVM contracts (WASM-based runtimes). The kind
//! decides which file extensions an upload may carry and which runner
//! namespace the contract is tested under.

use serde::Serialize;

use crate::error::CoreError;
use crate::naming;

/// Extensions accepted for EVM contract uploads.
pub const EVM_EXTENSIONS: &[&str] = &[".sol", ".txt"];

/// Extensions accepted for non-EVM contract uploads.
pub const NON_EVM_EXTENSIONS: &[&str] = &[".rs", ".wasm"];

/// Target family of an uploaded contract.
///
/// Serializes as `"evm"` / `"non-evm"`; the same strings name the
/// per-kind artifact subdirectories and the runner path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractKind {
    Evm,
    NonEvm,
}

impl ContractKind {
    /// Wire and directory name for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ContractKind::Evm => "evm",
            ContractKind::NonEvm => "non-evm",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ContractKind::Evm => "EVM",
            ContractKind::NonEvm => "Non-EVM",
        }
    }

    /// Extensions this kind accepts (lowercased, with leading dot).
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            ContractKind::Evm => EVM_EXTENSIONS,
            ContractKind::NonEvm => NON_EVM_EXTENSIONS,
        }
    }
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate that `filename` carries an extension `kind` accepts.
///
/// Comparison is case-insensitive. The error message is the exact
/// `detail` string the HTTP layer returns for a rejected upload; a
/// filename without an extension is reported with an empty extension.
pub fn validate_extension(filename: &str, kind: ContractKind) -> Result<(), CoreError> {
    let ext = naming::extension(filename);
    if kind.allowed_extensions().contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "File type {ext} not allowed."
        )))
    }
}
