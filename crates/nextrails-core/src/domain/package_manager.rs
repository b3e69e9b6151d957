//! Node package manager registry.
//!
//! Each manager knows how to fetch-and-run a package, run a script, add a
//! dependency, and which lock file betrays its use in a project.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// Detection order when several lock files are present.
    pub const ALL: [PackageManager; 4] = [Self::Npm, Self::Yarn, Self::Pnpm, Self::Bun];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }

    /// Download-and-execute prefix (`npx create-next-app ...`).
    pub const fn fetch(&self) -> &'static [&'static str] {
        match self {
            Self::Npm | Self::Yarn => &["npx"],
            Self::Pnpm => &["pnpm", "dlx"],
            Self::Bun => &["bunx"],
        }
    }

    /// Script runner prefix (`npm run build`).
    pub const fn run(&self) -> &'static [&'static str] {
        match self {
            Self::Npm => &["npm", "run"],
            Self::Yarn => &["yarn"],
            Self::Pnpm => &["pnpm"],
            Self::Bun => &["bun", "run"],
        }
    }

    /// Dependency install prefix (`npm install -D hygen`).
    pub const fn add(&self) -> &'static [&'static str] {
        match self {
            Self::Npm => &["npm", "install"],
            Self::Yarn => &["yarn", "add"],
            Self::Pnpm => &["pnpm", "add"],
            Self::Bun => &["bun", "add"],
        }
    }

    pub const fn lock_file(&self) -> &'static str {
        match self {
            Self::Npm => "package-lock.json",
            Self::Yarn => "yarn.lock",
            Self::Pnpm => "pnpm-lock.yaml",
            Self::Bun => "bun.lock.json",
        }
    }

    /// The executable probed for `--version`.
    pub fn binary(&self) -> &'static str {
        self.run()[0]
    }

    /// First manager whose lock file `exists` reports, in [`Self::ALL`] order.
    pub fn detect(mut exists: impl FnMut(&str) -> bool) -> Option<Self> {
        Self::ALL.into_iter().find(|pm| exists(pm.lock_file()))
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            "bun" => Ok(Self::Bun),
            other => Err(DomainError::UnknownPackageManager(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_managers() {
        assert_eq!("PNPM".parse::<PackageManager>().unwrap(), PackageManager::Pnpm);
        assert!(matches!(
            "gradle".parse::<PackageManager>(),
            Err(DomainError::UnknownPackageManager(_))
        ));
    }

    #[test]
    fn detects_from_lock_file() {
        let found = PackageManager::detect(|file| file == "yarn.lock");
        assert_eq!(found, Some(PackageManager::Yarn));
        assert_eq!(PackageManager::detect(|_| false), None);
    }

    #[test]
    fn npm_lock_wins_over_others() {
        let found = PackageManager::detect(|file| file == "yarn.lock" || file == "package-lock.json");
        assert_eq!(found, Some(PackageManager::Npm));
    }

    #[test]
    fn binary_is_first_word_of_run() {
        assert_eq!(PackageManager::Bun.binary(), "bun");
        assert_eq!(PackageManager::Pnpm.fetch(), ["pnpm", "dlx"]);
    }
}
