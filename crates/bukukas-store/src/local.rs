//! Local fallback file store

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};

/// A directory of pretty-printed JSON files, one per snapshot name.
///
/// Writes are full overwrites. Reads never fail: a missing or unreadable
/// file is reported as absent, matching the load policy that treats any
/// unusable source as "no data".
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of a stored file
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// The store directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Overwrite `filename` with `json`. A hard filesystem error here is
    /// fatal: there is nothing left to fall back to.
    pub fn write(&self, filename: &str, json: &str) -> StoreResult<PathBuf> {
        let path = self.path_for(filename);
        fs::create_dir_all(&self.dir).map_err(|err| StoreError::LocalWriteFailed {
            path: self.dir.to_string_lossy().to_string(),
            detail: err.to_string(),
        })?;
        fs::write(&path, json).map_err(|err| StoreError::LocalWriteFailed {
            path: path.to_string_lossy().to_string(),
            detail: err.to_string(),
        })?;
        Ok(path)
    }

    /// Read `filename`, or `None` when it does not exist or cannot be read.
    pub fn read(&self, filename: &str) -> Option<String> {
        let path = self.path_for(filename);
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no local backup at {}", path.display());
                None
            }
            Err(err) => {
                log::warn!("cannot read local backup {}: {err}", path.display());
                None
            }
        }
    }
}

// ==================== Tests ====================
