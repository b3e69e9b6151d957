//! Wrapper value objects: the `namespace` / `scope` blocks that nest routes.
//!
//! A [`WrapperPath`] is ordered outermost first, exactly the order in which the
//! blocks appear in `config/routes.rb`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── WrapperKind ──────────────────────────────────────────────────────────────

/// The two block keywords the route engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapperKind {
    Namespace,
    Scope,
}

impl WrapperKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Scope => "scope",
        }
    }
}

impl fmt::Display for WrapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WrapperKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "namespace" => Ok(Self::Namespace),
            "scope" => Ok(Self::Scope),
            other => Err(DomainError::InvalidWrapperName {
                kind: "wrapper",
                name: other.to_string(),
                reason: "kind must be 'namespace' or 'scope'",
            }),
        }
    }
}

// ── Wrapper ──────────────────────────────────────────────────────────────────

/// One `(kind, name)` nesting level.
///
/// Invariant: the name is renderable for its kind. Namespaces are Ruby
/// symbols (`:admin`), scopes are single-quoted strings (`'/api'`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wrapper {
    kind: WrapperKind,
    name: String,
}

impl Wrapper {
    pub fn new(kind: WrapperKind, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        match kind {
            WrapperKind::Namespace => validate_symbol(&name)?,
            WrapperKind::Scope => validate_quoted(&name)?,
        }
        Ok(Self { kind, name })
    }

    pub fn namespace(name: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(WrapperKind::Namespace, name)
    }

    pub fn scope(name: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(WrapperKind::Scope, name)
    }

    pub fn kind(&self) -> WrapperKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The opener line without indentation, e.g. `namespace :admin do`.
    pub fn opener(&self) -> String {
        match self.kind {
            WrapperKind::Namespace => format!("namespace :{} do", self.name),
            WrapperKind::Scope => format!("scope '{}' do", self.name),
        }
    }
}

impl fmt::Display for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WrapperKind::Namespace => write!(f, "namespace :{}", self.name),
            WrapperKind::Scope => write!(f, "scope '{}'", self.name),
        }
    }
}

fn validate_symbol(name: &str) -> Result<(), DomainError> {
    let invalid = |reason| DomainError::InvalidWrapperName {
        kind: "namespace",
        name: name.to_string(),
        reason,
    };

    let mut chars = name.chars();
    match chars.next() {
        None => return Err(invalid("name cannot be empty")),
        Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
            return Err(invalid("name must start with a letter or underscore"));
        }
        Some(_) => {}
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid("name may only contain letters, digits and underscores"));
    }
    Ok(())
}

fn validate_quoted(name: &str) -> Result<(), DomainError> {
    let invalid = |reason| DomainError::InvalidWrapperName {
        kind: "scope",
        name: name.to_string(),
        reason,
    };

    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.contains('\'') || name.contains('"') {
        return Err(invalid("name cannot contain quotes"));
    }
    if name.contains('\n') || name.contains('\r') {
        return Err(invalid("name cannot span lines"));
    }
    Ok(())
}

// ── WrapperPath ──────────────────────────────────────────────────────────────

/// Ordered wrapper sequence, outermost first. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WrapperPath(Vec<Wrapper>);

impl WrapperPath {
    pub fn new(wrappers: Vec<Wrapper>) -> Self {
        Self(wrappers)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a wrapper as the new innermost level.
    pub fn push(&mut self, wrapper: Wrapper) {
        self.0.push(wrapper);
    }

    pub fn with(mut self, wrapper: Wrapper) -> Self {
        self.push(wrapper);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Wrapper] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Wrapper> {
        self.0.iter()
    }
}

impl From<Vec<Wrapper>> for WrapperPath {
    fn from(wrappers: Vec<Wrapper>) -> Self {
        Self(wrappers)
    }
}

impl<'a> IntoIterator for &'a WrapperPath {
    type Item = &'a Wrapper;
    type IntoIter = std::slice::Iter<'a, Wrapper>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for WrapperPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(top level)");
        }
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(" > "))
    }
}

// ── RouteEntry ───────────────────────────────────────────────────────────────

/// The leaf declaration placed at the innermost level, e.g. `resources :users`.
///
/// Stored with its common indentation removed so it can be re-based anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteEntry(String);

impl RouteEntry {
    pub fn new(code: impl AsRef<str>) -> Result<Self, DomainError> {
        let code = code.as_ref();
        if code.trim().is_empty() {
            return Err(DomainError::EmptyRouteEntry);
        }
        let normalized = crate::domain::routes::rebase_indentation(code, 0, "\n");
        Ok(Self(normalized.trim_matches('\n').to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lines with surrounding whitespace removed, for line-exact matching.
    pub fn trimmed_lines(&self) -> Vec<&str> {
        self.0.lines().map(str::trim).collect()
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
