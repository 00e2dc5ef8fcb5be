//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ProviderError`] which covers every failure the provider can
//! report. It uses `thiserror` for ergonomic error definitions and includes named
//! constructors for the common failure scenarios.
//!
//! # Public API
//! - [`ProviderError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ProviderError>`
//!
//! # Error Categories
//! - **Dispatch**: Operation not supported, provider not ready
//! - **Execution**: Backend reported failure, cooperative cancellation honored
//! - **Repository**: Repository not found, git2 library errors
//! - **Settings**: Reading, writing and parsing the settings file

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-provider
#[derive(Error, Debug)]
pub enum ProviderError {
    // Dispatch errors, surfaced immediately and never queued
    #[error("Operation '{operation}' is not supported by this provider")]
    OperationNotSupported { operation: String },

    #[error("Source control provider is not ready. Call init() first.")]
    NotReady,

    // Execution errors, carried by a command result
    #[error("Operation '{operation}' failed: {message}")]
    ExecutionFailed { operation: String, message: String },

    #[error("Operation '{operation}' was cancelled")]
    Cancelled { operation: String },

    #[error("git {command} exited with status {exit_code}: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    // Repository errors
    #[error("Not in a git repository")]
    NotInGitRepo,

    #[error("Repository has no working directory: {path}")]
    BareRepository { path: PathBuf },

    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Settings errors
    #[error("Could not determine the configuration directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read settings file '{path}': {source}")]
    SettingsReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file '{path}': {source}")]
    SettingsParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write settings file '{path}': {source}")]
    SettingsWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using ProviderError
pub type Result<T> = std::result::Result<T, ProviderError>;

impl ProviderError {
    /// Create an operation not supported error
    pub fn operation_not_supported(operation: impl Into<String>) -> Self {
        Self::OperationNotSupported {
            operation: operation.into(),
        }
    }

    /// Create an execution failed error carrying the backend diagnostic
    pub fn execution_failed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a cancelled error
    pub fn cancelled(operation: impl Into<String>) -> Self {
        Self::Cancelled {
            operation: operation.into(),
        }
    }

    /// Create a command failed error from a process exit
    pub fn command_failed(command: impl Into<String>, exit_code: i32, stderr: &[String]) -> Self {
        Self::CommandFailed {
            command: command.into(),
            exit_code,
            stderr: stderr.join("\n").trim().to_string(),
        }
    }

    /// Create a settings read failed error
    pub fn settings_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SettingsReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a settings parse failed error
    pub fn settings_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::SettingsParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a settings write failed error
    pub fn settings_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SettingsWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// True for errors that are reported to the caller before anything is queued
    pub fn is_dispatch_error(&self) -> bool {
        matches!(
            self,
            ProviderError::OperationNotSupported { .. } | ProviderError::NotReady
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProviderError::NotInGitRepo;
        assert_eq!(err.to_string(), "Not in a git repository");
    }

    #[test]
    fn test_operation_not_supported_error() {
        let err = ProviderError::operation_not_supported("Branch");
        assert_eq!(
            err.to_string(),
            "Operation 'Branch' is not supported by this provider"
        );
        assert!(err.is_dispatch_error());
    }

    #[test]
    fn test_execution_failed_error() {
        let err = ProviderError::execution_failed("CheckIn", "nothing to commit");
        assert_eq!(err.to_string(), "Operation 'CheckIn' failed: nothing to commit");
        assert!(!err.is_dispatch_error());
    }

    #[test]
    fn test_command_failed_joins_stderr() {
        let stderr = vec![
            "fatal: pathspec 'x' did not match".to_string(),
            "".to_string(),
        ];
        let err = ProviderError::command_failed("add", 128, &stderr);
        assert!(err.to_string().contains("git add exited with status 128"));
        assert!(err.to_string().contains("pathspec 'x'"));
    }

    #[test]
    fn test_settings_read_failed() {
        let path = PathBuf::from("/test/settings.json");
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = ProviderError::settings_read_failed(&path, io_err);
        assert!(err.to_string().contains("/test/settings.json"));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_settings_parse_failed() {
        let path = PathBuf::from("/test/settings.json");
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid json").unwrap_err();
        let err = ProviderError::settings_parse_failed(&path, json_err);
        assert!(err.to_string().contains("/test/settings.json"));
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_not_ready_is_dispatch_error() {
        assert!(ProviderError::NotReady.is_dispatch_error());
        assert!(!ProviderError::cancelled("UpdateStatus").is_dispatch_error());
    }
}
