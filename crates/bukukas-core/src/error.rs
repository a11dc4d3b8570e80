//! Error types for bukukas-core
//!
//! Every failure here is user-correctable and blocks only the single
//! operation that caused it; nothing in this module ever aborts the
//! application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Entry failed validation
    ValidationError,
    /// Row index outside the journal
    RowOutOfRange,
    /// Account missing or not selected
    UnknownAccount,
    /// Account name already taken
    DuplicateAccount,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::RowOutOfRange => write!(f, "ROW_OUT_OF_RANGE"),
            ErrorCode::UnknownAccount => write!(f, "UNKNOWN_ACCOUNT"),
            ErrorCode::DuplicateAccount => write!(f, "DUPLICATE_ACCOUNT"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation rejected, state untouched
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for bukukas-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Row {row} out of range (journal has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    #[error("Account not selected or unknown: {name:?}")]
    UnknownAccount { name: String },

    #[error("Account already exists: {name}")]
    DuplicateAccount { name: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Validation { .. } => ErrorCode::ValidationError,
            CoreError::RowOutOfRange { .. } => ErrorCode::RowOutOfRange,
            CoreError::UnknownAccount { .. } => ErrorCode::UnknownAccount,
            CoreError::DuplicateAccount { .. } => ErrorCode::DuplicateAccount,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Validation { .. } => ErrorSeverity::Warning,
            CoreError::RowOutOfRange { .. } => ErrorSeverity::Warning,
            CoreError::UnknownAccount { .. } => ErrorSeverity::Info,
            CoreError::DuplicateAccount { .. } => ErrorSeverity::Warning,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::RowOutOfRange.to_string(), "ROW_OUT_OF_RANGE");
        assert_eq!(ErrorCode::UnknownAccount.to_string(), "UNKNOWN_ACCOUNT");
        assert_eq!(ErrorCode::DuplicateAccount.to_string(), "DUPLICATE_ACCOUNT");
    }

    #[test]
    fn test_core_error_code() {
        let error = CoreError::DuplicateAccount {
            name: "Kas".to_string(),
        };
        assert_eq!(error.code(), ErrorCode::DuplicateAccount);

        let error = CoreError::RowOutOfRange { row: 9, len: 3 };
        assert_eq!(error.code(), ErrorCode::RowOutOfRange);
    }

    #[test]
    fn test_core_error_severity() {
        let error = CoreError::Validation {
            message: "test".to_string(),
        };
        assert_eq!(error.severity(), ErrorSeverity::Warning);

        let error = CoreError::UnknownAccount {
            name: String::new(),
        };
        assert_eq!(error.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_error_messages_name_the_problem() {
        let error = CoreError::RowOutOfRange { row: 9, len: 3 };
        assert!(error.to_string().contains('9'));
        assert!(error.to_string().contains('3'));
    }
}
