/// Renderer adapters turning a dependency graph into text
mod ascii_tree_renderer;
mod dot_renderer;

pub use ascii_tree_renderer::AsciiTreeRenderer;
pub use dot_renderer::DotRenderer;

use crate::dependency_tree::domain::GraphNode;

/// `name@version`, followed by the concrete version when a tag was requested
fn node_label(node: &GraphNode) -> String {
    match node.resolved_version() {
        Some(resolved) if resolved != node.package().version() => {
            format!("{} => {}", node.package(), resolved)
        }
        _ => node.package().to_string(),
    }
}
