//! Installation engine: drives package state transitions in resolved order

use crate::graph::DependencyGraph;
use crate::registry::{Package, PackageRegistry};
use crate::resolver::Resolver;
use crate::{PackageError, Result};
use std::collections::HashSet;

/// The installation engine.
///
/// Owns the package registry and applies install/uninstall/upgrade
/// transitions against it. All operations are synchronous and
/// single-threaded; resolution always completes before any state is
/// mutated, so a cycle error never leaves a partial install behind.
#[derive(Debug, Clone, Default)]
pub struct Installer {
    registry: PackageRegistry,
}

impl Installer {
    /// Create a new engine with an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine over an existing registry
    pub fn with_registry(registry: PackageRegistry) -> Self {
        Self { registry }
    }

    /// Read-only access to the registry
    pub fn registry(&self) -> &PackageRegistry {
        &self.registry
    }

    /// Register a package (no-op if the identifier already exists)
    pub fn register(&mut self, name: &str, version: &str) {
        self.registry.register(name, version);
    }

    /// Declare that `name` depends on `depends_on`
    pub fn declare_dependency(&mut self, name: &str, depends_on: &str) {
        self.registry.declare_dependency(name, depends_on);
    }

    /// Compute the full installation order without mutating anything
    pub fn resolve_order(&self) -> Result<Vec<String>> {
        let graph = DependencyGraph::from_registry(&self.registry);
        Resolver::new(&graph).resolve()
    }

    /// Install every registered package in dependency order.
    ///
    /// Already-installed packages are skipped, so repeated calls are
    /// idempotent. If the graph contains a cycle, no package is mutated.
    pub fn install_all(&mut self) -> Result<()> {
        let order = self.resolve_order()?;
        for name in order {
            let package = self.registry.get_mut(&name)?;
            if !package.installed {
                package.installed = true;
            }
        }
        Ok(())
    }

    /// Install one package, transitively installing its unmet dependencies.
    ///
    /// Dependencies are walked depth-first in declaration order, skipping
    /// anything already installed. The walk collects a plan first and only
    /// then flips installed flags, so a cycle among the uninstalled
    /// dependencies aborts the whole call with nothing mutated.
    pub fn install_on_demand(&mut self, name: &str) -> Result<()> {
        if !self.registry.contains(name) {
            return Err(PackageError::NotFound(name.to_string()));
        }

        let mut active = HashSet::new();
        let mut plan = Vec::new();
        self.plan_install(name, &mut active, &mut plan)?;

        for name in plan {
            self.registry.get_mut(&name)?.installed = true;
        }
        Ok(())
    }

    fn plan_install(
        &self,
        name: &str,
        active: &mut HashSet<String>,
        plan: &mut Vec<String>,
    ) -> Result<()> {
        let package = self.registry.get(name)?;
        if package.installed || plan.iter().any(|p| p == name) {
            return Ok(());
        }

        active.insert(name.to_string());
        for dep in &package.dependencies {
            if active.contains(dep) {
                return Err(PackageError::CycleDetected(dep.clone()));
            }
            self.plan_install(dep, active, plan)?;
        }
        active.remove(name);

        // Postorder: dependencies enter the plan before their dependent
        plan.push(name.to_string());
        Ok(())
    }

    /// Uninstall a package.
    ///
    /// Does not cascade to dependents. Returns the identifiers of installed
    /// packages that now have an unmet dependency on `name`, so callers can
    /// surface the inconsistency instead of silently accepting it.
    pub fn uninstall(&mut self, name: &str) -> Result<Vec<String>> {
        let package = self.registry.get_mut(name)?;
        if !package.installed {
            return Err(PackageError::NotInstalled(name.to_string()));
        }
        package.installed = false;

        let orphaned_dependents = self
            .registry
            .packages()
            .filter(|p| p.installed && p.dependencies.iter().any(|d| d == name))
            .map(|p| p.name.clone())
            .collect();
        Ok(orphaned_dependents)
    }

    /// Change a package's version in place.
    ///
    /// Installed state is unaffected and no re-resolution happens.
    pub fn upgrade(&mut self, name: &str, new_version: &str) -> Result<()> {
        let package = self.registry.get_mut(name)?;
        if package.version == new_version {
            return Err(PackageError::AlreadyCurrent {
                package: name.to_string(),
                version: new_version.to_string(),
            });
        }
        package.version = new_version.to_string();
        Ok(())
    }

    /// Check whether a package is installed (false for unknown ids)
    pub fn is_installed(&self, name: &str) -> bool {
        self.registry.get(name).map(|p| p.installed).unwrap_or(false)
    }

    /// Snapshot of currently installed packages (order unspecified)
    pub fn installed_packages(&self) -> Vec<&Package> {
        self.registry.packages().filter(|p| p.installed).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_engine() -> Installer {
        let mut engine = Installer::new();
        engine.register("app", "1.0");
        engine.register("lib", "0.5");
        engine.register("base", "2.1");
        engine.declare_dependency("app", "lib");
        engine.declare_dependency("lib", "base");
        engine
    }

    #[test]
    fn test_install_all_marks_everything() {
        let mut engine = chain_engine();
        engine.install_all().unwrap();

        assert!(engine.is_installed("app"));
        assert!(engine.is_installed("lib"));
        assert!(engine.is_installed("base"));
    }

    #[test]
    fn test_install_all_is_idempotent() {
        let mut engine = chain_engine();
        engine.install_all().unwrap();
        engine.install_all().unwrap();

        assert_eq!(engine.installed_packages().len(), 3);
    }

    #[test]
    fn test_install_all_on_cycle_mutates_nothing() {
        let mut engine = chain_engine();
        engine.declare_dependency("base", "app");

        let result = engine.install_all();
        assert!(matches!(result, Err(PackageError::CycleDetected(_))));
        assert!(engine.installed_packages().is_empty());
    }

    #[test]
    fn test_install_on_demand_installs_transitively() {
        let mut engine = chain_engine();
        engine.install_on_demand("app").unwrap();

        assert!(engine.is_installed("app"));
        assert!(engine.is_installed("lib"));
        assert!(engine.is_installed("base"));
    }

    #[test]
    fn test_install_on_demand_only_touches_reachable() {
        let mut engine = chain_engine();
        engine.register("unrelated", "1.0");
        engine.install_on_demand("lib").unwrap();

        assert!(engine.is_installed("lib"));
        assert!(engine.is_installed("base"));
        assert!(!engine.is_installed("app"));
        assert!(!engine.is_installed("unrelated"));
    }

    #[test]
    fn test_install_on_demand_skips_installed_dependencies() {
        let mut engine = chain_engine();
        engine.install_on_demand("base").unwrap();
        engine.install_on_demand("app").unwrap();

        assert_eq!(engine.installed_packages().len(), 3);
    }

    #[test]
    fn test_install_on_demand_unknown_package() {
        let mut engine = Installer::new();
        let result = engine.install_on_demand("ghost");
        assert!(matches!(result, Err(PackageError::NotFound(_))));
    }

    #[test]
    fn test_install_on_demand_on_cycle_mutates_nothing() {
        let mut engine = Installer::new();
        engine.declare_dependency("x", "y");
        engine.declare_dependency("y", "x");

        let result = engine.install_on_demand("x");
        assert!(matches!(result, Err(PackageError::CycleDetected(_))));
        assert!(!engine.is_installed("x"));
        assert!(!engine.is_installed("y"));
    }

    #[test]
    fn test_uninstall_requires_installed() {
        let mut engine = chain_engine();
        let result = engine.uninstall("app");
        assert!(matches!(result, Err(PackageError::NotInstalled(_))));
    }

    #[test]
    fn test_uninstall_warns_about_orphaned_dependents() {
        let mut engine = chain_engine();
        engine.install_all().unwrap();

        let warnings = engine.uninstall("lib").unwrap();
        assert_eq!(warnings, vec!["app"]);
        assert!(!engine.is_installed("lib"));
        // No cascade: the dependent stays installed
        assert!(engine.is_installed("app"));
    }

    #[test]
    fn test_uninstall_without_dependents_warns_nothing() {
        let mut engine = chain_engine();
        engine.install_all().unwrap();

        let warnings = engine.uninstall("app").unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_upgrade_same_version() {
        let mut engine = chain_engine();
        let result = engine.upgrade("app", "1.0");
        assert!(matches!(result, Err(PackageError::AlreadyCurrent { .. })));
        assert_eq!(engine.registry().get("app").unwrap().version, "1.0");
    }

    #[test]
    fn test_upgrade_mutates_version_only() {
        let mut engine = chain_engine();
        engine.install_all().unwrap();
        engine.upgrade("app", "2.0").unwrap();

        assert_eq!(engine.registry().get("app").unwrap().version, "2.0");
        assert!(engine.is_installed("app"));
    }

    #[test]
    fn test_upgrade_unknown_package() {
        let mut engine = Installer::new();
        let result = engine.upgrade("ghost", "1.0");
        assert!(matches!(result, Err(PackageError::NotFound(_))));
    }

    #[test]
    fn test_is_installed_unknown_is_false() {
        let engine = Installer::new();
        assert!(!engine.is_installed("ghost"));
    }
}
