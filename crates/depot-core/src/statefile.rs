//! Persisted install state (depot.state)

use crate::installer::Installer;
use crate::{PackageError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An installed package record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatePackage {
    /// Package identifier
    pub name: String,
    /// Version at the time the state was captured
    pub version: String,
}

/// Snapshot of installed packages, persisted between invocations.
///
/// Only the installed/version state is recorded; no package content is
/// staged anywhere. Records are kept sorted by name so the serialized file
/// is stable across captures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateFile {
    /// State file format version
    pub version: u32,
    /// Installed packages, sorted by name
    #[serde(default)]
    pub packages: Vec<StatePackage>,
}

impl Default for StateFile {
    fn default() -> Self {
        Self::new()
    }
}

impl StateFile {
    /// Current state file format version
    pub const VERSION: u32 = 1;

    /// Create a new empty state file
    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            packages: Vec::new(),
        }
    }

    /// Capture the installed set of an engine
    pub fn capture(installer: &Installer) -> Self {
        let mut state = Self::new();
        for package in installer.installed_packages() {
            state.record(&package.name, &package.version);
        }
        state
    }

    /// Add or update an installed-package record
    pub fn record(&mut self, name: &str, version: &str) {
        self.packages.retain(|p| p.name != name);
        self.packages.push(StatePackage {
            name: name.to_string(),
            version: version.to_string(),
        });
        self.packages.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Get a record by name
    pub fn get(&self, name: &str) -> Option<&StatePackage> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Replay this state onto an engine.
    ///
    /// Each recorded package is installed on demand and its recorded
    /// version re-applied. Records whose identifier no longer exists in the
    /// engine's universe are skipped; a recorded cycle still fails.
    pub fn apply_to(&self, installer: &mut Installer) -> Result<()> {
        for record in &self.packages {
            match installer.install_on_demand(&record.name) {
                Ok(()) => {}
                Err(PackageError::NotFound(_)) => continue,
                Err(err) => return Err(err),
            }
            match installer.upgrade(&record.name, &record.version) {
                Ok(()) | Err(PackageError::AlreadyCurrent { .. }) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Parse a state file from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a state file from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the state file to disk
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with_chain() -> Installer {
        let mut engine = Installer::new();
        engine.register("app", "1.0");
        engine.register("lib", "0.5");
        engine.declare_dependency("app", "lib");
        engine
    }

    #[test]
    fn test_capture_installed_set() {
        let mut engine = engine_with_chain();
        engine.install_on_demand("lib").unwrap();

        let state = StateFile::capture(&engine);
        assert_eq!(state.packages.len(), 1);
        assert_eq!(state.get("lib").unwrap().version, "0.5");
        assert!(state.get("app").is_none());
    }

    #[test]
    fn test_records_stay_sorted() {
        let mut state = StateFile::new();
        state.record("zlib", "1.3");
        state.record("abc", "0.1");

        let names: Vec<&str> = state.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["abc", "zlib"]);
    }

    #[test]
    fn test_record_replaces_existing() {
        let mut state = StateFile::new();
        state.record("lib", "0.5");
        state.record("lib", "0.6");

        assert_eq!(state.packages.len(), 1);
        assert_eq!(state.get("lib").unwrap().version, "0.6");
    }

    #[test]
    fn test_apply_restores_installs_and_versions() {
        let mut engine = engine_with_chain();
        engine.install_all().unwrap();
        engine.upgrade("lib", "0.6").unwrap();
        let state = StateFile::capture(&engine);

        let mut fresh = engine_with_chain();
        state.apply_to(&mut fresh).unwrap();

        assert!(fresh.is_installed("app"));
        assert!(fresh.is_installed("lib"));
        assert_eq!(fresh.registry().get("lib").unwrap().version, "0.6");
    }

    #[test]
    fn test_apply_skips_vanished_packages() {
        let mut state = StateFile::new();
        state.record("gone", "1.0");

        let mut engine = engine_with_chain();
        state.apply_to(&mut engine).unwrap();
        assert!(engine.installed_packages().is_empty());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut state = StateFile::new();
        state.record("lib", "0.5");

        let serialized = state.to_toml().unwrap();
        let reparsed = StateFile::from_str(&serialized).unwrap();
        assert_eq!(state, reparsed);
    }
}
