//! Package registry: canonical owner of per-package state

use crate::{PackageError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A package in the registry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Package {
    /// Unique package identifier
    pub name: String,
    /// Version string (empty until the package is explicitly registered)
    pub version: String,
    /// Whether the package is currently installed
    pub installed: bool,
    /// Dependency identifiers in declaration order
    pub dependencies: Vec<String>,
}

impl Package {
    /// Create a new uninstalled package with no dependencies
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            installed: false,
            dependencies: Vec::new(),
        }
    }

    /// Add dependencies
    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }
}

/// Owns all packages, keyed by identifier.
///
/// Registration order is tracked separately so that iteration (and therefore
/// dependency resolution) is deterministic for a given registration history.
#[derive(Debug, Clone, Default)]
pub struct PackageRegistry {
    /// Packages by identifier
    packages: HashMap<String, Package>,
    /// Identifiers in registration order
    order: Vec<String>,
}

impl PackageRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package.
    ///
    /// If the identifier already exists nothing changes: the existing
    /// version and installed state are retained.
    pub fn register(&mut self, name: &str, version: &str) {
        if !self.packages.contains_key(name) {
            self.packages
                .insert(name.to_string(), Package::new(name, version));
            self.order.push(name.to_string());
        }
    }

    /// Declare that `name` depends on `depends_on`.
    ///
    /// Both sides are auto-registered if previously unseen (with an empty
    /// placeholder version), so forward references are fine. Duplicate
    /// edges collapse to one entry.
    pub fn declare_dependency(&mut self, name: &str, depends_on: &str) {
        self.register(name, "");
        self.register(depends_on, "");

        let package = self
            .packages
            .get_mut(name)
            .expect("package registered above");
        if !package.dependencies.iter().any(|d| d == depends_on) {
            package.dependencies.push(depends_on.to_string());
        }
    }

    /// Get a package by identifier
    pub fn get(&self, name: &str) -> Result<&Package> {
        self.packages
            .get(name)
            .ok_or_else(|| PackageError::NotFound(name.to_string()))
    }

    /// Get a mutable package by identifier
    pub(crate) fn get_mut(&mut self, name: &str) -> Result<&mut Package> {
        self.packages
            .get_mut(name)
            .ok_or_else(|| PackageError::NotFound(name.to_string()))
    }

    /// Check if an identifier is registered
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Identifiers in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|n| n.as_str())
    }

    /// Packages in registration order
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.order.iter().map(|n| &self.packages[n])
    }

    /// Number of registered packages
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
