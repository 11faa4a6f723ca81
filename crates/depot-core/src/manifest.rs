//! Package universe manifest (depot.toml)

use crate::installer::Installer;
use crate::{PackageError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A package entry in the manifest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestPackage {
    /// Package identifier
    pub name: String,
    /// Version string
    pub version: String,
    /// Dependency identifiers in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

/// Manifest describing the available package universe (depot.toml).
///
/// Packages are an array of tables so file order is preserved, which keeps
/// resolution deterministic for a given manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Manifest {
    /// Packages in file order
    #[serde(default)]
    pub packages: Vec<ManifestPackage>,
}

impl Manifest {
    /// Create a new empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a manifest from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load a manifest from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the manifest to a file
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject manifests that declare the same package twice
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for package in &self.packages {
            if !seen.insert(package.name.as_str()) {
                return Err(PackageError::DuplicatePackage(package.name.clone()));
            }
        }
        Ok(())
    }

    /// Look up a package entry by name
    pub fn get(&self, name: &str) -> Option<&ManifestPackage> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Load the whole universe into an installer.
    ///
    /// All packages are registered (in file order) before any edge is
    /// declared, so every entry keeps its manifest version rather than an
    /// auto-created placeholder.
    pub fn populate(&self, installer: &mut Installer) {
        for package in &self.packages {
            installer.register(&package.name, &package.version);
        }
        for package in &self.packages {
            for dep in &package.dependencies {
                installer.declare_dependency(&package.name, dep);
            }
        }
    }
}
