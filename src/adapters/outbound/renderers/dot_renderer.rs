use super::node_label;
use crate::dependency_tree::domain::{BuildWarning, DependencyGraph, NodeStatus};
use crate::ports::outbound::TreeRenderer;
use crate::shared::Result;
use std::fmt::Write;

/// DotRenderer adapter emitting a Graphviz `digraph`
///
/// Feed the output to `dot -Tpng` to get an image. Node ids are the
/// `name@version` identities; the root is bold, depth-truncated nodes are
/// dashed and unresolved nodes are red. Edges carry the declared spec when
/// it differs from the version requested.
pub struct DotRenderer;

impl DotRenderer {
    pub fn new() -> Self {
        Self
    }

    fn escape(text: &str) -> String {
        text.replace('\\', "\\\\").replace('"', "\\\"")
    }
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeRenderer for DotRenderer {
    fn render(&self, graph: &DependencyGraph, _warnings: &[BuildWarning]) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "digraph dependencies {{")?;
        writeln!(output, "  rankdir=LR;")?;
        writeln!(output, "  node [shape=box, fontname=\"Helvetica\"];")?;

        for node in graph.nodes() {
            let id = Self::escape(&node.package().to_string());
            let label = Self::escape(&node_label(node));
            let attributes = match node.status() {
                _ if node.package() == graph.root() && !node.is_unresolved() => {
                    ", style=bold".to_string()
                }
                NodeStatus::Resolved => String::new(),
                NodeStatus::DepthTruncated => ", style=dashed".to_string(),
                NodeStatus::Unresolved { reason } => {
                    format!(", color=red, tooltip=\"{}\"", Self::escape(reason))
                }
            };
            writeln!(output, "  \"{}\" [label=\"{}\"{}];", id, label, attributes)?;
        }

        for edge in graph.edges() {
            let from = Self::escape(&edge.from().to_string());
            let to = Self::escape(&edge.to().to_string());
            if edge.declared_spec() == edge.to().version() {
                writeln!(output, "  \"{}\" -> \"{}\";", from, to)?;
            } else {
                writeln!(
                    output,
                    "  \"{}\" -> \"{}\" [label=\"{}\"];",
                    from,
                    to,
                    Self::escape(edge.declared_spec())
                )?;
            }
        }

        writeln!(output, "}}")?;
        Ok(output)
    }
}
