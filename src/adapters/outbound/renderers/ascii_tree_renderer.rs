use super::node_label;
use crate::dependency_tree::domain::{
    BuildWarning, DependencyGraph, GraphNode, NodeStatus, PackageRef,
};
use crate::ports::outbound::TreeRenderer;
use crate::shared::Result;
use std::collections::HashSet;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// One unit of work for the explicit rendering stack
enum Step<'g> {
    Enter {
        package: &'g PackageRef,
        prefix: String,
        last: bool,
    },
    Leave(&'g PackageRef),
}

/// AsciiTreeRenderer adapter printing the graph as an `npm ls` style tree
///
/// Each package is expanded the first time it is printed. Later references
/// are annotated ` (deduped)`, references back to a package on the current
/// path ` [cycle]`. Warnings collected during the build are listed after
/// the tree.
pub struct AsciiTreeRenderer;

impl AsciiTreeRenderer {
    pub fn new() -> Self {
        Self
    }

    fn status_annotation(node: &GraphNode) -> String {
        match node.status() {
            NodeStatus::Resolved => String::new(),
            NodeStatus::DepthTruncated => " (max depth)".to_string(),
            NodeStatus::Unresolved { reason } => format!(" [unresolved: {}]", reason),
        }
    }

    fn push_children<'g>(stack: &mut Vec<Step<'g>>, node: &'g GraphNode, prefix: &str) {
        let count = node.dependencies().len();
        // Reversed so the first declared dependency is popped first
        for (i, child) in node.children().enumerate().collect::<Vec<_>>().into_iter().rev() {
            stack.push(Step::Enter {
                package: child,
                prefix: prefix.to_string(),
                last: i + 1 == count,
            });
        }
    }
}

impl Default for AsciiTreeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeRenderer for AsciiTreeRenderer {
    fn render(&self, graph: &DependencyGraph, warnings: &[BuildWarning]) -> Result<String> {
        let root = graph
            .root_node()
            .ok_or_else(|| anyhow::anyhow!("Graph has no node for root {}", graph.root()))?;

        let mut output = String::new();
        output.push_str(&node_label(root));
        output.push_str(&Self::status_annotation(root));
        output.push('\n');

        let mut printed: HashSet<&PackageRef> = HashSet::from([root.package()]);
        let mut on_path: HashSet<&PackageRef> = HashSet::from([root.package()]);
        let mut stack = Vec::new();
        Self::push_children(&mut stack, root, "");

        while let Some(step) = stack.pop() {
            let (package, prefix, last) = match step {
                Step::Leave(package) => {
                    on_path.remove(package);
                    continue;
                }
                Step::Enter {
                    package,
                    prefix,
                    last,
                } => (package, prefix, last),
            };

            output.push_str(&prefix);
            output.push_str(if last { LAST_BRANCH } else { BRANCH });

            let Some(node) = graph.node(package) else {
                output.push_str(&format!("{}\n", package));
                continue;
            };
            output.push_str(&node_label(node));

            if on_path.contains(package) {
                output.push_str(" [cycle]\n");
                continue;
            }
            if !printed.insert(package) {
                output.push_str(" (deduped)\n");
                continue;
            }

            output.push_str(&Self::status_annotation(node));
            output.push('\n');

            if !node.dependencies().is_empty() {
                on_path.insert(package);
                stack.push(Step::Leave(package));
                let child_prefix = format!("{}{}", prefix, if last { SPACE } else { PIPE });
                Self::push_children(&mut stack, node, &child_prefix);
            }
        }

        if !warnings.is_empty() {
            output.push_str(&format!("\n{} warning(s):\n", warnings.len()));
            for warning in warnings {
                output.push_str(&format!("  - {}\n", warning));
            }
        }

        Ok(output)
    }
}
