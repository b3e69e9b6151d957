//! NextRails Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for NextRails, the
//! tool that keeps a Rails `config/routes.rb` and a Next.js frontend in step
//! when resources are scaffolded.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          nextrails-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (RouteService, ScaffoldService)      │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, CommandRunner, VersionProbe)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    nextrails-adapters (Infrastructure)  │
//! │ (LocalFilesystem, SystemCommandRunner)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (RouteEngine, WrapperPath, Resource)   │
//! │         No I/O, No Processes            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use nextrails_core::domain::{RouteEngine, RouteRequest};
//!
//! let request = RouteRequest::new("resources :users")
//!     .unwrap()
//!     .namespace("admin");
//!
//! let routes = "Rails.application.routes.draw do\nend\n";
//! let updated = RouteEngine::default()
//!     .inject(request.entry(), &request.wrappers().unwrap(), routes)
//!     .unwrap();
//!
//! assert!(updated.contains("  namespace :admin do\n    resources :users\n  end\n"));
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        RouteOutcome, RouteService, ScaffoldOptions, ScaffoldReport, ScaffoldService, VersionCache,
        ports::{CommandRunner, CommandSpec, Filesystem, ToolVersionProbe},
    };
    pub use crate::domain::{
        AnchorPolicy, Behavior, PackageManager, ResourceName, RouteEngine, RouteEntry,
        RouteRequest, VersionRequirement, Wrapper, WrapperKind, WrapperPath,
    };
    pub use crate::error::{NextRailsError, NextRailsResult};
}
