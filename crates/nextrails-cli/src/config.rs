//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the option structs
//! built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `NEXT_VERSION` / `NODE_REQUIRED_VERSION`
//! 3. Environment variables (`NEXTRAILS_FRONTEND__NEXT_VERSION=15.2.0`)
//! 4. `.nextrails.toml` in the current directory
//! 5. Config file (`--config`, or the user config directory)
//! 6. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use nextrails_core::application::services::{
    DEFAULT_API_SCOPE, DEFAULT_NEXT_VERSION, DEFAULT_NODE_REQUIREMENT, DEFAULT_ROUTES_FILE,
};
use nextrails_core::domain::{AnchorPolicy, PackageManager};

/// Name of the per-project config file.
pub const LOCAL_CONFIG: &str = ".nextrails.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Routes file editing.
    pub routes: RoutesConfig,
    /// Next.js project settings.
    pub frontend: FrontendConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Whether the project has been set up with `nextrails install`.
    pub install: InstallState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutesConfig {
    pub file: PathBuf,
    pub ambiguous_anchor: AnchorPolicy,
    /// Scope for scaffold routes; empty means none.
    pub default_scope: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontendConfig {
    pub package_manager: Option<PackageManager>,
    pub next_version: String,
    pub node_required_version: String,
    pub typescript: bool,
    pub directory: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallState {
    pub configured: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            routes: RoutesConfig {
                file: PathBuf::from(DEFAULT_ROUTES_FILE),
                ambiguous_anchor: AnchorPolicy::First,
                default_scope: DEFAULT_API_SCOPE.into(),
            },
            frontend: FrontendConfig {
                package_manager: None,
                next_version: DEFAULT_NEXT_VERSION.into(),
                node_required_version: DEFAULT_NODE_REQUIREMENT.into(),
                typescript: true,
                directory: PathBuf::from("frontend"),
            },
            output: OutputConfig {
                no_color: false,
                format: "human".into(),
            },
            install: InstallState::default(),
        }
    }
}

/// Everything [`AppConfig::layered`] reads from.
struct Sources {
    file: Option<PathBuf>,
    file_required: bool,
    local: PathBuf,
    env: Environment,
    next_version: Option<String>,
    node_required_version: Option<String>,
}

impl AppConfig {
    /// Load configuration from defaults, files and the environment.
    ///
    /// `config_file` is the path the user passed via `--config`; that file
    /// must exist.  Without it the default location is read if present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (file, file_required) = match config_file {
            Some(path) => (Some(path.clone()), true),
            None => (Self::config_path(), false),
        };

        Self::layered(Sources {
            file,
            file_required,
            local: PathBuf::from(LOCAL_CONFIG),
            env: Self::environment(),
            next_version: std::env::var("NEXT_VERSION").ok(),
            node_required_version: std::env::var("NODE_REQUIRED_VERSION").ok(),
        })
    }

    fn environment() -> Environment {
        Environment::with_prefix("NEXTRAILS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn layered(sources: Sources) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to serialise built-in defaults")?;

        let mut builder = Config::builder().add_source(defaults);
        if let Some(path) = &sources.file {
            builder = builder.add_source(File::from(path.as_path()).required(sources.file_required));
        }
        builder = builder
            .add_source(File::from(sources.local.as_path()).required(false))
            .add_source(sources.env)
            .set_override_option("frontend.next_version", sources.next_version)?
            .set_override_option(
                "frontend.node_required_version",
                sources.node_required_version,
            )?;

        builder
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness;
    /// `None` when no home directory can be determined.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "nextrails", "nextrails")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Look up a dotted key such as `frontend.next_version`.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let mut value = serde_json::to_value(self).ok()?;
        for part in key.split('.') {
            value = value.get_mut(part)?.take();
        }
        Some(value)
    }

    /// Scope wrapped around scaffold routes.
    pub fn scaffold_scope(&self) -> Option<String> {
        let scope = self.routes.default_scope.trim();
        (!scope.is_empty()).then(|| scope.to_string())
    }

    /// Explicit init state, or an initializer already in `root`.
    pub fn is_configured(&self, root: &Path) -> bool {
        self.install.configured
            || root
                .join(nextrails_core::application::services::INITIALIZER_PATH)
                .exists()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use pretty_assertions::assert_eq;

    fn sources(file: Option<PathBuf>, env: &[(&str, &str)]) -> Sources {
        let vars: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Sources {
            file,
            file_required: false,
            local: PathBuf::from("does-not-exist.nextrails.toml"),
            env: AppConfig::environment().source(Some(vars)),
            next_version: None,
            node_required_version: None,
        }
    }

    #[test]
    fn defaults_match_generator_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.frontend.next_version, "15.1.6");
        assert_eq!(cfg.frontend.node_required_version, ">= 18.20");
        assert_eq!(cfg.routes.file, PathBuf::from("config/routes.rb"));
        assert_eq!(cfg.scaffold_scope().as_deref(), Some("/api"));
    }

    #[test]
    fn layered_without_sources_returns_defaults() {
        let cfg = AppConfig::layered(sources(None, &[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[frontend]\npackage_manager = \"pnpm\"\ntypescript = false\n\n[routes]\nambiguous_anchor = \"reject\"\n",
        )
        .unwrap();

        let cfg = AppConfig::layered(sources(Some(path), &[])).unwrap();
        assert_eq!(cfg.frontend.package_manager, Some(PackageManager::Pnpm));
        assert!(!cfg.frontend.typescript);
        assert_eq!(cfg.routes.ambiguous_anchor, AnchorPolicy::Reject);
        assert_eq!(cfg.frontend.next_version, "15.1.6");
    }

    #[test]
    fn environment_overrides_file() {
        let cfg = AppConfig::layered(sources(
            None,
            &[
                ("NEXTRAILS_FRONTEND__NEXT_VERSION", "15.2.0"),
                ("NEXTRAILS_INSTALL__CONFIGURED", "true"),
            ],
        ))
        .unwrap();
        assert_eq!(cfg.frontend.next_version, "15.2.0");
        assert!(cfg.install.configured);
    }

    #[test]
    fn bare_next_version_wins() {
        let mut src = sources(None, &[("NEXTRAILS_FRONTEND__NEXT_VERSION", "15.2.0")]);
        src.next_version = Some("14.2.3".into());
        let cfg = AppConfig::layered(src).unwrap();
        assert_eq!(cfg.frontend.next_version, "14.2.3");
    }

    #[test]
    fn missing_required_file_fails() {
        let mut src = sources(Some(PathBuf::from("/nonexistent/nextrails.toml")), &[]);
        src.file_required = true;
        assert!(AppConfig::layered(src).is_err());
    }

    #[test]
    fn get_walks_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.get("frontend.next_version"),
            Some(serde_json::json!("15.1.6"))
        );
        assert_eq!(cfg.get("frontend.missing"), None);
    }

    #[test]
    fn empty_scope_means_none() {
        let mut cfg = AppConfig::default();
        cfg.routes.default_scope = "  ".into();
        assert_eq!(cfg.scaffold_scope(), None);
    }
}
