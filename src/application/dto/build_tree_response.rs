use crate::dependency_tree::domain::{BuildWarning, DependencyEdge, DependencyGraph, PackageRef};

/// BuildTreeResponse - everything a build produced, ready for rendering
#[derive(Debug, Clone)]
pub struct BuildTreeResponse {
    pub graph: DependencyGraph,
    pub warnings: Vec<BuildWarning>,
    /// Back edges closing a cycle, in depth-first discovery order
    pub cycle_edges: Vec<DependencyEdge>,
    /// Dependencies-first order; `None` when the graph has cycles
    pub install_order: Option<Vec<PackageRef>>,
}

impl BuildTreeResponse {
    pub fn new(
        graph: DependencyGraph,
        warnings: Vec<BuildWarning>,
        cycle_edges: Vec<DependencyEdge>,
        install_order: Option<Vec<PackageRef>>,
    ) -> Self {
        Self {
            graph,
            warnings,
            cycle_edges,
            install_order,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
