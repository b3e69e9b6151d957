//! Application layer for NextRails.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (RouteService, ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All route editing rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    RouteOutcome, RouteService, ScaffoldOptions, ScaffoldReport, ScaffoldService, ScaffoldStep,
    VersionCache,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandOutput, CommandRunner, CommandSpec, Filesystem, ToolVersionProbe};

pub use error::ApplicationError;
