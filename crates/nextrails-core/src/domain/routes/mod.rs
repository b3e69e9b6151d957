//! Structural editing of `config/routes.rb`.
//!
//! The engine adds a route inside a chain of `namespace` / `scope` blocks,
//! creating only the blocks that are missing, and can take the route back out
//! again, collapsing any block that the removal leaves empty.
//!
//! ```text
//! Rails.application.routes.draw do        <- container (anchor of last resort)
//!   scope '/api' do                       <- matched prefix ...
//!     namespace :admin do                 <- ... innermost match
//!       namespace :users do               <- generated suffix
//!         resources :products             <- entry
//!       end
//!     end
//!   end
//! end
//! ```
//!
//! Everything here is a pure `&str -> String` transform; reading and writing
//! the file is the job of `application::RouteService`.

mod inject;
mod resolve;
mod revoke;
mod scan;
mod wrap;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::wrapper::{RouteEntry, WrapperPath};

pub use resolve::{AnchorPolicy, MatchResult};
pub use scan::BlockSpan;
pub use wrap::{INDENT_UNIT, rebase_indentation, wrap};

/// Direction of a generator run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    #[default]
    Invoke,
    Revoke,
}

impl Behavior {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Invoke => "invoke",
            Self::Revoke => "revoke",
        }
    }
}

impl std::fmt::Display for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry point to the route engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteEngine {
    policy: AnchorPolicy,
}

impl RouteEngine {
    pub fn new(policy: AnchorPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AnchorPolicy {
        self.policy
    }

    /// Locate the longest existing prefix of `wrappers` in `text`.
    pub fn resolve(&self, wrappers: &WrapperPath, text: &str) -> Result<MatchResult, DomainError> {
        let doc = scan::Document::parse(text);
        let outline = scan::Outline::scan(&doc)?;
        resolve::resolve(wrappers, &outline, self.policy)
    }

    /// Add `entry` under `wrappers`. Re-running adds a second copy.
    #[instrument(level = "debug", skip_all, fields(entry = %entry, path = %wrappers))]
    pub fn inject(
        &self,
        entry: &RouteEntry,
        wrappers: &WrapperPath,
        text: &str,
    ) -> Result<String, DomainError> {
        inject::inject(entry, wrappers, text, self.policy)
    }

    /// Remove `entry` from under `wrappers` and collapse emptied wrappers.
    #[instrument(level = "debug", skip_all, fields(entry = %entry, path = %wrappers))]
    pub fn revoke(
        &self,
        entry: &RouteEntry,
        wrappers: &WrapperPath,
        text: &str,
    ) -> Result<String, DomainError> {
        revoke::revoke(entry, wrappers, text, self.policy)
    }

    pub fn apply(
        &self,
        behavior: Behavior,
        entry: &RouteEntry,
        wrappers: &WrapperPath,
        text: &str,
    ) -> Result<String, DomainError> {
        match behavior {
            Behavior::Invoke => self.inject(entry, wrappers, text),
            Behavior::Revoke => self.revoke(entry, wrappers, text),
        }
    }
}
