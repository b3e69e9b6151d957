// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for NextRails.
//!
//! Pure logic only: no filesystem, no processes, no async. Everything here is
//! a value type or a `&str -> String` transform.
//!
//! - [`routes`]: structural editing of `config/routes.rb`
//! - [`wrapper`]: the `namespace` / `scope` value objects it works with
//! - [`resource`], [`route_request`]: from generator input to a route
//! - [`package_manager`], [`version`]: frontend toolchain knowledge

// Public API - what the world sees
pub mod error;
pub mod package_manager;
pub mod resource;
pub mod route_request;
pub mod routes;
pub mod version;
pub mod wrapper;

// Re-exports for convenience
pub use error::{DomainError, ErrorCategory};
pub use package_manager::PackageManager;
pub use resource::{Attribute, ResourceName, pluralize, snake_case};
pub use route_request::RouteRequest;
pub use routes::{AnchorPolicy, Behavior, BlockSpan, MatchResult, RouteEngine};
pub use version::VersionRequirement;
pub use wrapper::{RouteEntry, Wrapper, WrapperKind, WrapperPath};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ========================================================================
    // Engine scenarios, driven through the public API
    // ========================================================================

    const DRAW: &str = "Rails.application.routes.draw do\nend";

    fn admin() -> WrapperPath {
        WrapperPath::empty().with(Wrapper::namespace("admin").unwrap())
    }

    #[test]
    fn scenario_new_namespace_inside_draw() {
        let engine = RouteEngine::default();
        let out = engine
            .inject(&RouteEntry::new("resources :users").unwrap(), &admin(), DRAW)
            .unwrap();
        assert_eq!(
            out,
            "Rails.application.routes.draw do\n  namespace :admin do\n    resources :users\n  end\nend"
        );
    }

    #[test]
    fn scenario_second_entry_reuses_namespace() {
        let engine = RouteEngine::default();
        let first = engine
            .inject(&RouteEntry::new("resources :users").unwrap(), &admin(), DRAW)
            .unwrap();
        let second = engine
            .inject(&RouteEntry::new("resources :roles").unwrap(), &admin(), &first)
            .unwrap();

        assert_eq!(second.matches("namespace :admin do").count(), 1);
        assert!(second.contains("    resources :users\n    resources :roles\n"));
    }

    #[test]
    fn scenario_revoke_collapses_to_original() {
        let engine = RouteEngine::default();
        let entry = RouteEntry::new("resources :users").unwrap();
        let injected = engine.inject(&entry, &admin(), DRAW).unwrap();
        assert_eq!(engine.revoke(&entry, &admin(), &injected).unwrap(), DRAW);
    }

    #[test]
    fn scenario_nested_namespace_keeps_sibling_content() {
        let engine = RouteEngine::default();
        let text = "Rails.application.routes.draw do\n  namespace :admin do\n    resources :posts\n  end\nend\n";
        let path = admin().with(Wrapper::namespace("users").unwrap());
        let out = engine
            .inject(&RouteEntry::new("resources :products").unwrap(), &path, text)
            .unwrap();
        assert_eq!(
            out,
            "Rails.application.routes.draw do\n  namespace :admin do\n    namespace :users do\n      resources :products\n    end\n    resources :posts\n  end\nend\n"
        );
    }

    #[test]
    fn scenario_resolve_reports_matched_prefix() {
        let text = "Rails.application.routes.draw do\n  scope '/api' do\n    resources :health\n  end\nend\n";
        let path = WrapperPath::empty()
            .with(Wrapper::scope("/api").unwrap())
            .with(Wrapper::namespace("admin").unwrap());

        let found = RouteEngine::default().resolve(&path, text).unwrap();
        assert_eq!(found.matched(), 1);
        assert!(!found.is_full(&path));
        assert_eq!(found.base_indent(), Some(2));
        assert!(found.container.is_some());
    }

    #[test]
    fn resource_name_drives_engine() {
        let request = ResourceName::parse("admin/users/product")
            .unwrap()
            .resource_route(Some("/api"))
            .unwrap();
        let out = RouteEngine::default()
            .inject(request.entry(), &request.wrappers().unwrap(), DRAW)
            .unwrap();
        assert_eq!(
            out,
            "Rails.application.routes.draw do\n  scope '/api' do\n    namespace :admin do\n      namespace :users do\n        resources :products\n      end\n    end\n  end\nend"
        );
    }
}
