//! Snapshot service - ledger persistence
//!
//! Saves and loads the whole ledger as one pretty-printed JSON document.
//! Saves go through a named temp file in the destination directory followed
//! by an atomic rename, so a crash mid-write can never leave a half-written
//! snapshot behind. Loads are all-or-nothing: a missing file is a
//! recoverable no-op, and a malformed or invariant-violating file fails
//! without touching in-memory state.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::domain::result::{Error, Result};
use crate::domain::LedgerSnapshot;
use crate::store::LedgerStore;

/// Snapshot service for ledger persistence
pub struct SnapshotService {
    store: Arc<LedgerStore>,
}

impl SnapshotService {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    /// Serialize the current ledger to `path`, overwriting unconditionally
    pub fn save(&self, path: &Path) -> Result<SaveReport> {
        let snapshot = self.store.snapshot();
        let content = serde_json::to_string_pretty(&snapshot)?;

        // Temp file must live in the destination directory for the rename
        // to stay atomic
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;

        let size_bytes = fs::metadata(path)?.len();
        Ok(SaveReport {
            path: path.to_path_buf(),
            accounts: snapshot.accounts.len(),
            transactions: snapshot.transactions.len(),
            size_bytes,
        })
    }

    /// Load a snapshot from `path`, replacing in-memory state wholesale
    ///
    /// A missing file reports `LoadOutcome::NotFound` and changes nothing.
    /// A file that fails to parse or violates the ledger invariants fails
    /// with `CorruptState` and changes nothing.
    pub fn load(&self, path: &Path) -> Result<LoadOutcome> {
        if !path.exists() {
            return Ok(LoadOutcome::NotFound);
        }

        let content = fs::read_to_string(path)?;
        let snapshot: LedgerSnapshot =
            serde_json::from_str(&content).map_err(|e| Error::corrupt_state(e.to_string()))?;
        snapshot.validate().map_err(Error::CorruptState)?;

        let accounts = snapshot.accounts.len();
        let transactions = snapshot.transactions.len();
        self.store.restore(snapshot);

        Ok(LoadOutcome::Loaded {
            accounts,
            transactions,
        })
    }
}

/// Result of a save operation
#[derive(Debug, Serialize)]
pub struct SaveReport {
    pub path: PathBuf,
    pub accounts: usize,
    pub transactions: usize,
    pub size_bytes: u64,
}

/// Result of a load operation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum LoadOutcome {
    /// Snapshot applied; counts are post-replacement
    Loaded {
        accounts: usize,
        transactions: usize,
    },
    /// Source absent; in-memory state untouched
    NotFound,
}
