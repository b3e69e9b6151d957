//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "add a route" or "scaffold a resource".

pub mod route_service;
pub mod scaffold_service;
pub mod toolchain;

pub use route_service::{DEFAULT_ROUTES_FILE, RouteOutcome, RouteService};
pub use scaffold_service::{
    DEFAULT_API_SCOPE, DEFAULT_NEXT_VERSION, DEFAULT_NODE_REQUIREMENT, INITIALIZER_PATH,
    InstallOutcome, ScaffoldOptions, ScaffoldReport, ScaffoldService, ScaffoldStep, Selection,
};
pub use toolchain::VersionCache;
