//! Error types for bukukas-store
//!
//! The two failure modes deliberately have very different weights: a
//! remote problem of any kind (missing auth, network, conflict, 4xx/5xx)
//! collapses into `RemoteUnavailable` and only triggers the local
//! fallback, while a local write failure is fatal because there is no
//! further fallback behind it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreErrorCode {
    /// Remote store could not be used
    RemoteUnavailable,
    /// Local fallback write failed
    LocalWriteFailed,
}

impl std::fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreErrorCode::RemoteUnavailable => write!(f, "REMOTE_UNAVAILABLE"),
            StoreErrorCode::LocalWriteFailed => write!(f, "LOCAL_WRITE_FAILED"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreErrorSeverity {
    /// Informational - a fallback path took over
    Info,
    /// Critical - the data could not be persisted anywhere
    Critical,
}

impl std::fmt::Display for StoreErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreErrorSeverity::Info => write!(f, "info"),
            StoreErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Persistence error type
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Remote store unavailable: {detail}")]
    RemoteUnavailable { detail: String },

    #[error("Local backup write failed at {path}: {detail}")]
    LocalWriteFailed { path: String, detail: String },
}

impl StoreError {
    /// Collapse any remote-side failure into the single unavailable outcome
    pub fn remote(detail: impl std::fmt::Display) -> Self {
        StoreError::RemoteUnavailable {
            detail: detail.to_string(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> StoreErrorCode {
        match self {
            StoreError::RemoteUnavailable { .. } => StoreErrorCode::RemoteUnavailable,
            StoreError::LocalWriteFailed { .. } => StoreErrorCode::LocalWriteFailed,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> StoreErrorSeverity {
        match self {
            StoreError::RemoteUnavailable { .. } => StoreErrorSeverity::Info,
            StoreError::LocalWriteFailed { .. } => StoreErrorSeverity::Critical,
        }
    }

    /// True when no fallback remains behind this failure
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::LocalWriteFailed { .. })
    }
}

/// Result type with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

// ==================== Tests ====================
