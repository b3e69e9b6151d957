//! Reverse direction: remove a route and collapse wrappers it leaves empty.

use std::ops::Range;

use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::routes::resolve::{AnchorPolicy, resolve};
use crate::domain::routes::scan::{Document, Outline};
use crate::domain::wrapper::{RouteEntry, WrapperPath};

pub(crate) fn revoke(
    entry: &RouteEntry,
    wrappers: &WrapperPath,
    text: &str,
    policy: AnchorPolicy,
) -> Result<String, DomainError> {
    let mut doc = Document::parse(text);
    let outline = Outline::scan(&doc)?;
    let matched = resolve(wrappers, &outline, policy)?;

    // Inside a matched wrapper only its own lines are candidates; a route in
    // a nested `constraints` or `resources` block belongs to that block.
    let needle = entry.trimmed_lines();
    let found = match matched.body() {
        Some(body) => find_lines(&doc, body, &needle, |line| matched.is_direct(line)),
        None => find_lines(&doc, 0..doc.len(), &needle, |_| true),
    };
    let start = found.ok_or_else(|| DomainError::RouteNotFound {
        entry: entry.to_string(),
    })?;
    doc.remove(start..start + needle.len());

    // Every removal so far happened inside each remaining chain block, so
    // opener indices are stable and closers move up by `removed`.
    let mut removed = needle.len();
    let mut collapsed = 0;
    for span in matched.chain.iter().rev() {
        let close = span.close - removed;
        if !doc.is_blank(span.open + 1..close) {
            break;
        }
        doc.remove(span.open..close + 1);
        removed += close + 1 - span.open;
        collapsed += 1;
    }

    debug!(line = start + 1, collapsed, "Revoked route");
    Ok(doc.render())
}

/// First index in `region` accepted by `eligible` where `needle` matches
/// consecutive trimmed lines.
fn find_lines(
    doc: &Document,
    region: Range<usize>,
    needle: &[&str],
    eligible: impl Fn(usize) -> bool,
) -> Option<usize> {
    let end = region.end.checked_sub(needle.len())?;
    (region.start..=end).filter(|&start| eligible(start)).find(|&start| {
        needle
            .iter()
            .enumerate()
            .all(|(offset, line)| doc.content(start + offset).trim() == *line)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::routes::inject::inject;
    use crate::domain::wrapper::Wrapper;
    use pretty_assertions::assert_eq;

    fn entry(code: &str) -> RouteEntry {
        RouteEntry::new(code).unwrap()
    }

    fn namespaces(names: &[&str]) -> WrapperPath {
        names
            .iter()
            .map(|n| Wrapper::namespace(*n).unwrap())
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn collapses_wrapper_it_emptied() {
        let text = "Rails.application.routes.draw do\n  namespace :admin do\n    resources :users\n  end\nend";
        let out = revoke(
            &entry("resources :users"),
            &namespaces(&["admin"]),
            text,
            AnchorPolicy::First,
        )
        .unwrap();
        assert_eq!(out, "Rails.application.routes.draw do\nend");
    }

    #[test]
    fn keeps_wrapper_with_other_content() {
        let text = "draw do\n  namespace :admin do\n    resources :users\n    resources :posts\n  end\nend\n";
        let out = revoke(
            &entry("resources :users"),
            &namespaces(&["admin"]),
            text,
            AnchorPolicy::First,
        )
        .unwrap();
        assert_eq!(
            out,
            "draw do\n  namespace :admin do\n    resources :posts\n  end\nend\n"
        );
    }

    #[test]
    fn walk_stops_at_first_non_empty_wrapper() {
        let text = "\
draw do
  namespace :admin do
    resources :posts
    namespace :users do

      resources :products
    end
  end
end
";
        let out = revoke(
            &entry("resources :products"),
            &namespaces(&["admin", "users"]),
            text,
            AnchorPolicy::First,
        )
        .unwrap();
        assert_eq!(out, "draw do\n  namespace :admin do\n    resources :posts\n  end\nend\n");
    }

    #[test]
    fn missing_path_removes_first_exact_line() {
        let text = "draw do\n  resources :users\n  resources :users_admin\nend\n";
        let out = revoke(
            &entry("resources :users"),
            &namespaces(&["admin"]),
            text,
            AnchorPolicy::First,
        )
        .unwrap();
        assert_eq!(out, "draw do\n  resources :users_admin\nend\n");
    }

    #[test]
    fn only_searches_inside_matched_wrapper() {
        let text = "draw do\n  resources :users\n  namespace :admin do\n    resources :posts\n  end\nend\n";
        let err = revoke(
            &entry("resources :users"),
            &namespaces(&["admin"]),
            text,
            AnchorPolicy::First,
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::RouteNotFound {
                entry: "resources :users".into()
            }
        );
    }

    #[test]
    fn leaves_routes_inside_nested_blocks_alone() {
        let text = "draw do\n  namespace :admin do\n    constraints(x) do\n      resources :users\n    end\n  end\nend\n";
        let err = revoke(
            &entry("resources :users"),
            &namespaces(&["admin"]),
            text,
            AnchorPolicy::First,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::RouteNotFound { .. }));
    }

    #[test]
    fn prefers_direct_line_over_nested_copy() {
        let text = "draw do\n  namespace :admin do\n    constraints(x) do\n      resources :users\n    end\n    resources :users\n  end\nend\n";
        let out = revoke(
            &entry("resources :users"),
            &namespaces(&["admin"]),
            text,
            AnchorPolicy::First,
        )
        .unwrap();
        assert_eq!(
            out,
            "draw do\n  namespace :admin do\n    constraints(x) do\n      resources :users\n    end\n  end\nend\n"
        );
    }

    #[test]
    fn round_trip_through_generic_block() {
        let original = "Rails.application.routes.draw do\n  constraints(x) do\n    namespace :admin do\n      resources :posts\n    end\n  end\nend\n";
        let route = entry("resources :users");
        let wrappers = namespaces(&["admin"]);

        let injected = inject(&route, &wrappers, original, AnchorPolicy::First).unwrap();
        assert_eq!(injected.matches("namespace :admin do").count(), 1);
        assert!(injected.contains("      resources :users\n"));
        let restored = revoke(&route, &wrappers, &injected, AnchorPolicy::First).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn trailing_comment_with_do_is_editable() {
        let original = "Rails.application.routes.draw do\n  resources :tasks # things to do\n  get :do\nend\n";
        let route = entry("resources :users");
        let wrappers = namespaces(&["admin"]);

        let injected = inject(&route, &wrappers, original, AnchorPolicy::First).unwrap();
        assert!(injected.contains("  namespace :admin do\n    resources :users\n  end\n"));
        let restored = revoke(&route, &wrappers, &injected, AnchorPolicy::First).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn removes_multiline_entries() {
        let text = "draw do\n  namespace :api do\n    resources :posts do\n      get :feed\n    end\n  end\nend\n";
        let out = revoke(
            &entry("resources :posts do\n  get :feed\nend"),
            &namespaces(&["api"]),
            text,
            AnchorPolicy::First,
        )
        .unwrap();
        assert_eq!(out, "draw do\nend\n");
    }

    #[test]
    fn round_trip_restores_original() {
        let original = "Rails.application.routes.draw do\n  namespace :admin do\n    resources :posts\n  end\nend\n";
        let wrappers = WrapperPath::empty()
            .with(Wrapper::scope("/api").unwrap())
            .with(Wrapper::namespace("admin").unwrap())
            .with(Wrapper::namespace("users").unwrap());
        let route = entry("resources :products");

        let injected = inject(&route, &wrappers, original, AnchorPolicy::First).unwrap();
        assert_ne!(injected, original);
        let restored = revoke(&route, &wrappers, &injected, AnchorPolicy::First).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn partial_round_trip_keeps_existing_prefix() {
        let original = "draw do\n  namespace :admin do\n    resources :posts\n  end\nend\n";
        let wrappers = namespaces(&["admin", "users"]);
        let route = entry("resources :products");

        let injected = inject(&route, &wrappers, original, AnchorPolicy::First).unwrap();
        let restored = revoke(&route, &wrappers, &injected, AnchorPolicy::First).unwrap();
        assert_eq!(restored, original);
    }
}
