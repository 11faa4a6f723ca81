//! Depot dependency resolution and installation engine
//!
//! In-memory package management core: a registry of packages and their
//! declared dependencies, a derived dependency graph, a deterministic
//! topological resolver with cycle detection, and an installation engine
//! driving install/uninstall/upgrade state transitions.

pub mod graph;
pub mod installer;
pub mod manifest;
pub mod registry;
pub mod resolver;
pub mod statefile;

pub use graph::DependencyGraph;
pub use installer::Installer;
pub use manifest::{Manifest, ManifestPackage};
pub use registry::{Package, PackageRegistry};
pub use resolver::Resolver;
pub use statefile::{StateFile, StatePackage};

/// Package management errors
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Circular dependency detected involving package '{0}'")]
    CycleDetected(String),

    #[error("Package '{0}' is not installed")]
    NotInstalled(String),

    #[error("Package '{package}' is already at version {version}")]
    AlreadyCurrent { package: String, version: String },

    #[error("Duplicate package '{0}' in manifest")]
    DuplicatePackage(String),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PackageError>;
