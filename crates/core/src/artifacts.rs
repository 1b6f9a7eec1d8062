//! Local artifact store for uploaded contracts and fetched reports.
//!
//! The gateway keeps the most recent upload and report per contract so
//! operators can inspect what was last sent and received; it is not a
//! durable storage system. Layout under the configured data root:
//!
//! ```text
//! uploaded_contracts/evm/        uploaded EVM sources
//! uploaded_contracts/non-evm/    uploaded non-EVM sources
//! test_summaries/evm/            fetched EVM reports
//! test_summaries/non-evm/        fetched non-EVM reports
//! ```
//!
//! File names are normalized to the contract's lowercased base name
//! (see [`crate::naming`]), so purging by base-name prefix reliably
//! removes every stale artifact before a re-upload is processed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::contract::ContractKind;
use crate::error::CoreError;
use crate::naming;

/// Directory holding uploaded contract sources, one subdirectory per kind.
pub const CONTRACTS_DIR: &str = "uploaded_contracts";

/// Directory holding fetched test reports, one subdirectory per kind.
pub const SUMMARIES_DIR: &str = "test_summaries";

/// Stores contract uploads and test reports on the local filesystem.
///
/// Thread-safe; designed to be wrapped in `Arc` and shared across the
/// application. Also owns the per-contract-name locks that serialize
/// cleanup + upload for the same contract.
pub struct ArtifactStore {
    contracts_root: PathBuf,
    summaries_root: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ArtifactStore {
    /// Create a store rooted at `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            contracts_root: data_dir.join(CONTRACTS_DIR),
            summaries_root: data_dir.join(SUMMARIES_DIR),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Directory holding uploaded sources for `kind`.
    pub fn contract_dir(&self, kind: ContractKind) -> PathBuf {
        self.contracts_root.join(kind.as_str())
    }

    /// Directory holding fetched reports for `kind`.
    pub fn summary_dir(&self, kind: ContractKind) -> PathBuf {
        self.summaries_root.join(kind.as_str())
    }

    /// Acquire the upload lock for a contract base name.
    ///
    /// One mutex exists per `(kind, base_name)`; holding the returned
    /// guard serializes cleanup + upload against concurrent requests
    /// for the same contract. Lock entries are retained for the life
    /// of the process; the key space is bounded by distinct contract
    /// names.
    pub async fn lock(&self, kind: ContractKind, base_name: &str) -> OwnedMutexGuard<()> {
        let key = format!("{}/{base_name}", kind.as_str());
        let slot = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(key)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        slot.lock_owned().await
    }

    /// Remove stale local artifacts for a contract base name.
    ///
    /// Deletes every file in the kind's contract and summary
    /// directories whose name starts with `base_name`, creating both
    /// directories first if missing. Best-effort: failures are logged
    /// and skipped so a stale file can never fail an upload.
    pub async fn purge(&self, kind: ContractKind, base_name: &str) {
        for dir in [self.contract_dir(kind), self.summary_dir(kind)] {
            if let Err(e) = tokio::fs::create_dir_all(&dir).await {
                tracing::warn!(dir = %dir.display(), error = %e, "Failed to create artifact directory");
                continue;
            }
            if let Err(e) = remove_prefixed(&dir, base_name).await {
                tracing::warn!(dir = %dir.display(), error = %e, "Failed to scan artifact directory");
            }
        }
    }

    /// Persist an uploaded contract under the kind's contract directory.
    ///
    /// The on-disk name is the contract's normalized (lowercased)
    /// filename, so the next upload of the same contract purges it.
    /// Returns the path written.
    pub async fn save_contract(
        &self,
        kind: ContractKind,
        filename: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, CoreError> {
        let stored = naming::stored_filename(filename);
        if stored.is_empty() {
            return Err(CoreError::Validation(format!(
                "Invalid contract filename '{filename}'"
            )));
        }
        self.write_file(self.contract_dir(kind), &stored, bytes).await
    }

    /// Persist a fetched report under the kind's summary directory.
    ///
    /// Returns the path written.
    pub async fn save_report(
        &self,
        kind: ContractKind,
        report_filename: &str,
        content: &str,
    ) -> Result<PathBuf, CoreError> {
        self.write_file(self.summary_dir(kind), report_filename, content.as_bytes())
            .await
    }

    async fn write_file(
        &self,
        dir: PathBuf,
        filename: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, CoreError> {
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            CoreError::Internal(format!("Failed to create {}: {e}", dir.display()))
        })?;

        let path = dir.join(filename);
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            CoreError::Internal(format!("Failed to write {}: {e}", path.display()))
        })?;

        Ok(path)
    }
}

/// Delete every file in `dir` whose name starts with `prefix`.
///
/// Individual deletion failures are logged and skipped.
async fn remove_prefixed(dir: &Path, prefix: &str) -> std::io::Result<()> {
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.starts_with(prefix) {
            continue;
        }

        let path = entry.path();
        if path.is_dir() {
            continue;
        }

        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(path = %path.display(), error = %e, "Failed to delete stale artifact");
        }
    }

    Ok(())
}
