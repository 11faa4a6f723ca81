//! Installation order computation using depth-first topological sort

use crate::graph::DependencyGraph;
use crate::{PackageError, Result};
use std::collections::HashMap;

/// Visit state for the depth-first walk.
///
/// A vertex absent from the mark map is unvisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the current recursion path
    InProgress,
    /// Fully processed and emitted
    Done,
}

/// Computes a deterministic installation order over a dependency graph.
///
/// The walk starts from every vertex in insertion order and recurses into
/// dependency lists in declaration order, emitting vertices in postorder so
/// dependencies always precede their dependents. Encountering a vertex that
/// is still on the recursion path fails with [`PackageError::CycleDetected`]
/// naming that vertex. Runs in O(V + E).
pub struct Resolver<'a> {
    graph: &'a DependencyGraph,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over a graph snapshot
    pub fn new(graph: &'a DependencyGraph) -> Self {
        Self { graph }
    }

    /// Compute the installation order, or report a cycle
    pub fn resolve(&self) -> Result<Vec<String>> {
        let mut marks: HashMap<&str, Mark> = HashMap::new();
        let mut order = Vec::with_capacity(self.graph.len());

        for vertex in self.graph.vertices() {
            if !marks.contains_key(vertex) {
                self.visit(vertex, &mut marks, &mut order)?;
            }
        }

        Ok(order)
    }

    fn visit(
        &self,
        vertex: &'a str,
        marks: &mut HashMap<&'a str, Mark>,
        order: &mut Vec<String>,
    ) -> Result<()> {
        marks.insert(vertex, Mark::InProgress);

        for dep in self.graph.dependencies_of(vertex) {
            match marks.get(dep.as_str()) {
                None => self.visit(dep, marks, order)?,
                Some(Mark::InProgress) => {
                    return Err(PackageError::CycleDetected(dep.clone()));
                }
                Some(Mark::Done) => {}
            }
        }

        marks.insert(vertex, Mark::Done);
        // Postorder: a vertex is emitted only after all of its dependencies
        order.push(vertex.to_string());
        Ok(())
    }
}
