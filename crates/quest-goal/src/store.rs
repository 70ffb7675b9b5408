// store.rs — LedgerStore: file persistence for a GoalLedger.
//
// The whole ledger lives in a single JSON file. Saving always replaces the
// file: the encoded ledger is written to `<file>.tmp` next to it and then
// renamed over the destination, so a reader sees either the old ledger or
// the new one.

use std::fs;
use std::path::{Path, PathBuf};

use crate::codec;
use crate::error::GoalError;
use crate::ledger::GoalLedger;

/// Persistent store for one goal ledger file.
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Create a store for the given ledger file. Nothing is touched on disk
    /// until the first save or load.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a ledger file exists at the store's path.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Save the ledger to disk (creates or overwrites).
    pub fn save(&self, ledger: &GoalLedger) -> Result<(), GoalError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| GoalError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let bytes = codec::encode(ledger)?;
        let tmp_path = self.tmp_file();
        fs::write(&tmp_path, bytes).map_err(|source| GoalError::IoError {
            path: tmp_path.display().to_string(),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(GoalError::IoError {
                path: self.path.display().to_string(),
                source,
            });
        }

        tracing::info!(
            path = %self.path.display(),
            goals = ledger.len(),
            score = ledger.score(),
            "ledger saved"
        );
        Ok(())
    }

    /// Load the ledger from disk. A missing file is an I/O error.
    pub fn load(&self) -> Result<GoalLedger, GoalError> {
        let bytes = fs::read(&self.path).map_err(|source| GoalError::IoError {
            path: self.path.display().to_string(),
            source,
        })?;
        let ledger = codec::decode(&bytes)?;

        tracing::info!(
            path = %self.path.display(),
            goals = ledger.len(),
            score = ledger.score(),
            "ledger loaded"
        );
        Ok(ledger)
    }

    /// Sibling file used for the write-then-rename save.
    fn tmp_file(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
