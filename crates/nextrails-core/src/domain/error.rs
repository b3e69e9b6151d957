// ============================================================================
// domain/error.rs - ROUTE ENGINE + NAMING ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (engine results are compared in tests)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid {kind} name '{name}': {reason}")]
    InvalidWrapperName {
        kind: &'static str,
        name: String,
        reason: &'static str,
    },

    #[error("Route entry cannot be empty")]
    EmptyRouteEntry,

    #[error("Invalid resource name '{name}': {reason}")]
    InvalidResourceName { name: String, reason: String },

    #[error("Invalid version requirement '{requirement}': {reason}")]
    InvalidVersionRequirement { requirement: String, reason: String },

    #[error("Invalid attribute '{attribute}': {reason}")]
    InvalidAttribute {
        attribute: String,
        reason: &'static str,
    },

    #[error("Unknown package manager '{0}'")]
    UnknownPackageManager(String),

    // ========================================================================
    // Structural Errors (routes file does not follow the block grammar)
    // ========================================================================
    #[error("Malformed routes file at line {line}: {reason}")]
    MalformedInput { line: usize, reason: &'static str },

    #[error(
        "Ambiguous anchor for {wrapper}: blocks at lines {first_line} and {second_line} both match"
    )]
    AmbiguousAnchor {
        wrapper: String,
        first_line: usize,
        second_line: usize,
    },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Route not found: {entry}")]
    RouteNotFound { entry: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidWrapperName { kind, .. } => match *kind {
                "namespace" => vec![
                    "Namespace names must be valid Ruby symbols".into(),
                    "Use letters, digits and underscores, e.g. admin or api_v1".into(),
                ],
                _ => vec![
                    "Scope names cannot be empty or contain single quotes".into(),
                    "Example: --scope /api".into(),
                ],
            },
            Self::MalformedInput { line, .. } => vec![
                format!("Check the block structure around line {}", line),
                "Every 'do' must be closed by a matching 'end'".into(),
            ],
            Self::AmbiguousAnchor { wrapper, .. } => vec![
                format!("Merge the duplicate {} blocks into one", wrapper),
                "Or set routes.ambiguous_anchor = \"first\" to use the first block".into(),
            ],
            Self::RouteNotFound { entry } => vec![
                format!("'{}' is not present in the routes file", entry),
                "Nothing was removed".into(),
            ],
            Self::UnknownPackageManager(_) => {
                vec!["Supported package managers: npm, yarn, pnpm, bun".into()]
            }
            Self::InvalidAttribute { .. } => vec![
                "Attributes are written field:type, e.g. title:string".into(),
            ],
            Self::InvalidResourceName { .. } => vec![
                "Use a snake_case or CamelCase name, optionally namespaced".into(),
                "Examples: product, admin/users/product, Admin::Product".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidWrapperName { .. }
            | Self::EmptyRouteEntry
            | Self::InvalidResourceName { .. }
            | Self::InvalidAttribute { .. }
            | Self::InvalidVersionRequirement { .. }
            | Self::UnknownPackageManager(_) => ErrorCategory::Validation,
            Self::MalformedInput { .. } | Self::AmbiguousAnchor { .. } => {
                ErrorCategory::Structure
            }
            Self::RouteNotFound { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Structure,
    NotFound,
}
