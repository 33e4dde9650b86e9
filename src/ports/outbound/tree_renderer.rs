use crate::dependency_tree::domain::{BuildWarning, DependencyGraph};
use crate::shared::Result;

/// TreeRenderer port for turning a built graph into text
///
/// Renderers consume the immutable graph and the warnings collected while
/// building it; unresolved branches should be annotated, not hidden.
pub trait TreeRenderer {
    /// Renders the graph
    ///
    /// # Errors
    /// Returns an error if the output cannot be produced
    fn render(&self, graph: &DependencyGraph, warnings: &[BuildWarning]) -> Result<String>;
}
