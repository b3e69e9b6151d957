//! Caller-facing route description: an entry plus namespace/scope names.

use crate::domain::error::DomainError;
use crate::domain::wrapper::{RouteEntry, Wrapper, WrapperPath};

/// A route to add or remove.
///
/// Scopes always wrap namespaces, mirroring what the scaffold generator emits:
///
/// ```text
/// scope '/api' do
///   namespace :admin do
///     resources :products
///   end
/// end
/// ```
///
/// Names are validated when [`RouteRequest::wrappers`] builds the path, so the
/// builder methods stay infallible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    entry: RouteEntry,
    scopes: Vec<String>,
    namespaces: Vec<String>,
}

impl RouteRequest {
    pub fn new(code: impl AsRef<str>) -> Result<Self, DomainError> {
        Ok(Self {
            entry: RouteEntry::new(code)?,
            scopes: Vec::new(),
            namespaces: Vec::new(),
        })
    }

    /// Add a namespace below the ones already given.
    pub fn namespace(mut self, name: impl Into<String>) -> Self {
        self.namespaces.push(name.into());
        self
    }

    /// Add a scope below the ones already given (but above every namespace).
    pub fn scope(mut self, name: impl Into<String>) -> Self {
        self.scopes.push(name.into());
        self
    }

    pub fn entry(&self) -> &RouteEntry {
        &self.entry
    }

    pub fn wrappers(&self) -> Result<WrapperPath, DomainError> {
        let scopes = self.scopes.iter().map(Wrapper::scope);
        let namespaces = self.namespaces.iter().map(Wrapper::namespace);
        scopes
            .chain(namespaces)
            .collect::<Result<Vec<_>, _>>()
            .map(WrapperPath::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes_wrap_namespaces_regardless_of_call_order() {
        let request = RouteRequest::new("root 'admin#index'")
            .unwrap()
            .namespace("admin")
            .scope("/api");
        assert_eq!(
            request.wrappers().unwrap().to_string(),
            "scope '/api' > namespace :admin"
        );
    }

    #[test]
    fn plain_request_has_empty_path() {
        let request = RouteRequest::new("root 'welcome#index'").unwrap();
        assert!(request.wrappers().unwrap().is_empty());
    }

    #[test]
    fn invalid_namespace_is_reported_on_build() {
        let request = RouteRequest::new("resources :x").unwrap().namespace("not valid");
        assert!(matches!(
            request.wrappers(),
            Err(DomainError::InvalidWrapperName { .. })
        ));
    }
}
