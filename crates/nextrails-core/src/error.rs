//! Unified error handling for NextRails Core.
//!
//! Wraps domain and application errors behind one type so the CLI has a
//! single thing to format, categorize and turn into an exit code.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for NextRails Core operations.
#[derive(Debug, Error, Clone)]
pub enum NextRailsError {
    /// Errors from the domain layer (bad names, malformed routes file).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, external tools).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl NextRailsError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec!["This appears to be a bug in NextRails".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Structure => ErrorCategory::Structure,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// A revoke that found nothing to remove. Callers may treat this as a no-op.
    pub fn is_route_not_found(&self) -> bool {
        matches!(self, Self::Domain(DomainError::RouteNotFound { .. }))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Structure,
    NotFound,
    Toolchain,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type NextRailsResult<T> = Result<T, NextRailsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_category_is_preserved() {
        let err: NextRailsError = DomainError::MalformedInput {
            line: 3,
            reason: "block is never closed",
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Structure);
        assert!(err.suggestions().iter().any(|s| s.contains("line 3")));
    }

    #[test]
    fn route_not_found_is_detectable() {
        let err: NextRailsError = DomainError::RouteNotFound {
            entry: "resources :users".into(),
        }
        .into();
        assert!(err.is_route_not_found());
    }
}
