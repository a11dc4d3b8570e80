//! Save/load orchestration: remote first, local fallback
//!
//! Every call is synchronous and self-contained; there is no background
//! sync and no persistent connection. The same pretty-printed JSON text
//! goes to whichever store ends up taking the write, so the local fallback
//! is always byte-equal to what the remote would have received.

use std::path::PathBuf;

use crate::error::{StoreError, StoreResult};
use crate::local::LocalStore;
use crate::remote::RemoteStore;

/// Where a save landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveLocation {
    /// Stored in the remote repository
    Remote,
    /// Stored in the local fallback file
    Local(PathBuf),
}

/// Where loaded data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    Local,
}

/// Persistence gateway combining an optional remote store with the local
/// fallback. Without a remote (no token configured) every call goes
/// straight to the local store.
pub struct Gateway {
    remote: Option<Box<dyn RemoteStore>>,
    local: LocalStore,
}

impl Gateway {
    pub fn new(remote: Option<Box<dyn RemoteStore>>, local: LocalStore) -> Self {
        Self { remote, local }
    }

    /// Persist `value` under `filename`: remote first, local on any remote
    /// failure. Only a local write failure propagates; everything on the
    /// remote side is logged and absorbed by the fallback.
    pub fn save(&self, filename: &str, value: &serde_json::Value) -> StoreResult<SaveLocation> {
        let json =
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());

        if let Some(remote) = &self.remote {
            match remote.write(filename, &json) {
                Ok(()) => {
                    log::info!("backup stored remotely: {} -> {}", filename, remote.describe());
                    return Ok(SaveLocation::Remote);
                }
                Err(err) => {
                    log::warn!(
                        "remote save of {} failed ({}), falling back to local: {err}",
                        filename,
                        remote.describe()
                    );
                }
            }
        }

        let path = self.local.write(filename, &json)?;
        log::info!("backup stored locally: {}", path.display());
        Ok(SaveLocation::Local(path))
    }

    /// Load `filename`: remote first, then local, then nothing. Unreadable
    /// or unparsable sources are treated as absent, never as errors.
    pub fn load(&self, filename: &str) -> Option<(serde_json::Value, LoadSource)> {
        if let Some(remote) = &self.remote {
            match remote.read(filename) {
                Ok(Some(text)) => match serde_json::from_str(&text) {
                    Ok(value) => return Some((value, LoadSource::Remote)),
                    Err(err) => {
                        log::warn!("remote backup {} is not valid JSON: {err}", filename);
                    }
                },
                Ok(None) => log::debug!("no remote backup named {}", filename),
                Err(err) => log::warn!("remote load of {} failed: {err}", filename),
            }
        }

        let text = self.local.read(filename)?;
        match serde_json::from_str(&text) {
            Ok(value) => Some((value, LoadSource::Local)),
            Err(err) => {
                log::warn!("local backup {} is not valid JSON: {err}", filename);
                None
            }
        }
    }
}

// ==================== Tests ====================
