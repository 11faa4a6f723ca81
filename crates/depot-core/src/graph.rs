//! Dependency graph: a queryable snapshot of the registry's edges

use crate::registry::PackageRegistry;
use std::collections::HashMap;

/// Directed dependency graph over package identifiers.
///
/// An edge `from -> to` means `from` requires `to` installed first. The
/// vertex list preserves insertion order and each adjacency list preserves
/// declaration order, so traversals are deterministic. Acyclicity is not
/// enforced here; the resolver checks it lazily.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Vertices in insertion order
    vertices: Vec<String>,
    /// Adjacency lists in declaration order
    edges: HashMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from the registry's current edges.
    ///
    /// Vertices appear in registration order, which includes packages that
    /// were only ever referenced as a dependency.
    pub fn from_registry(registry: &PackageRegistry) -> Self {
        let mut graph = Self::new();
        for package in registry.packages() {
            graph.add_vertex(&package.name);
            for dep in &package.dependencies {
                graph.add_edge(&package.name, dep);
            }
        }
        graph
    }

    /// Add a vertex if not already present
    pub fn add_vertex(&mut self, name: &str) {
        if !self.edges.contains_key(name) {
            self.edges.insert(name.to_string(), Vec::new());
            self.vertices.push(name.to_string());
        }
    }

    /// Add an edge `from -> to`, creating missing vertices.
    ///
    /// Duplicate edges collapse to one entry.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.add_vertex(from);
        self.add_vertex(to);

        let neighbors = self.edges.get_mut(from).expect("vertex added above");
        if !neighbors.iter().any(|n| n == to) {
            neighbors.push(to.to_string());
        }
    }

    /// Dependencies of a vertex in declaration order (empty for unknown ids)
    pub fn dependencies_of(&self, name: &str) -> &[String] {
        self.edges.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Vertices in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.vertices.iter().map(|v| v.as_str())
    }

    /// Check if a vertex is present
    pub fn contains(&self, name: &str) -> bool {
        self.edges.contains_key(name)
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let graph = DependencyGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert!(graph.dependencies_of("anything").is_empty());
    }

    #[test]
    fn test_add_edge_creates_vertices() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("app", "lib");

        assert_eq!(graph.len(), 2);
        assert!(graph.contains("app"));
        assert!(graph.contains("lib"));
        assert_eq!(graph.dependencies_of("app"), ["lib"]);
        assert!(graph.dependencies_of("lib").is_empty());
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("app", "lib");
        graph.add_edge("app", "lib");

        assert_eq!(graph.dependencies_of("app").len(), 1);
    }

    #[test]
    fn test_vertex_order_is_insertion_order() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("b", "a");
        graph.add_vertex("c");

        let vertices: Vec<&str> = graph.vertices().collect();
        assert_eq!(vertices, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_from_registry() {
        let mut registry = PackageRegistry::new();
        registry.register("app", "1.0");
        registry.declare_dependency("app", "lib");
        registry.declare_dependency("app", "util");

        let graph = DependencyGraph::from_registry(&registry);
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.dependencies_of("app"), ["lib", "util"]);
    }
}
