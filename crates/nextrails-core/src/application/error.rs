//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The routes file does not exist.
    #[error("Routes file not found: {path}")]
    RoutesFileMissing { path: PathBuf },

    /// In-memory state lock was poisoned.
    #[error("Internal state lock poisoned")]
    StoreLockError,

    /// A required executable is not on PATH.
    #[error("{tool} is not installed or not on PATH")]
    ToolMissing { tool: String },

    /// A tool is installed but too old.
    #[error("{tool} {found} does not satisfy {required}")]
    ToolVersionMismatch {
        tool: String,
        found: String,
        required: String,
    },

    /// No package manager was given, detected, or chosen.
    #[error("Could not determine which package manager to use")]
    PackageManagerUnresolved,

    /// An external command exited unsuccessfully.
    #[error("Command `{command}` failed with status {status}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    /// An external command could not be started at all.
    #[error("Could not run `{command}`: {reason}")]
    CommandSpawn { command: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::RoutesFileMissing { path } => vec![
                format!("Expected a routes file at {}", path.display()),
                "Run from the Rails application root or pass --file".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
            Self::ToolMissing { tool } => vec![
                format!("Install {} and make sure it is on your PATH", tool),
            ],
            Self::ToolVersionMismatch { tool, required, .. } => vec![
                format!("Upgrade {} to a version matching {}", tool, required),
                "Or set frontend.node_required_version in your config".into(),
            ],
            Self::PackageManagerUnresolved => vec![
                "Pass --package-manager npm|yarn|pnpm|bun".into(),
                "Or set frontend.package_manager in your config".into(),
            ],
            Self::CommandFailed { stderr, .. } if !stderr.trim().is_empty() => {
                vec![format!("Command output: {}", stderr.trim())]
            }
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::RoutesFileMissing { .. } => ErrorCategory::NotFound,
            Self::ToolMissing { .. }
            | Self::ToolVersionMismatch { .. }
            | Self::CommandFailed { .. }
            | Self::CommandSpawn { .. } => ErrorCategory::Toolchain,
            Self::PackageManagerUnresolved => ErrorCategory::Configuration,
        }
    }
}
