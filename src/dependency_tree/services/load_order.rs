use crate::dependency_tree::domain::{DependencyEdge, DependencyGraph, PackageRef};
use std::collections::{HashSet, VecDeque};

/// LoadOrder service for ordering and cycle analysis of a built graph
///
/// Pure algorithms over an immutable `DependencyGraph`; both use explicit
/// stacks/queues so long dependency chains cannot overflow the call stack.
pub struct LoadOrder;

impl LoadOrder {
    /// Returns the edges that close a cycle (back edges of a depth-first
    /// walk from the root, children visited in declaration order)
    pub fn cycle_edges(graph: &DependencyGraph) -> Vec<DependencyEdge> {
        let mut back_edges = Vec::new();
        let Some(root) = graph.root_node() else {
            return back_edges;
        };

        let mut on_path: HashSet<&PackageRef> = HashSet::new();
        let mut finished: HashSet<&PackageRef> = HashSet::new();
        // (node, index of the next edge to explore)
        let mut stack: Vec<(&PackageRef, usize)> = vec![(root.package(), 0)];
        on_path.insert(root.package());

        while let Some((package, next_edge)) = stack.pop() {
            let edges = graph
                .node(package)
                .map(|node| node.dependencies())
                .unwrap_or_default();

            let Some(edge) = edges.get(next_edge) else {
                on_path.remove(package);
                finished.insert(package);
                continue;
            };
            stack.push((package, next_edge + 1));

            let child = edge.to();
            if on_path.contains(child) {
                back_edges.push(edge.clone());
            } else if !finished.contains(child) && graph.contains(child) {
                on_path.insert(child);
                stack.push((child, 0));
            }
        }

        back_edges
    }

    pub fn has_cycles(graph: &DependencyGraph) -> bool {
        !Self::cycle_edges(graph).is_empty()
    }

    /// Dependencies-first install order: every package appears after all of
    /// the packages it depends on
    ///
    /// Ties are broken by discovery order. Returns `None` when the graph
    /// contains a cycle, since no such order exists.
    pub fn install_order(graph: &DependencyGraph) -> Option<Vec<PackageRef>> {
        let nodes = graph.nodes();
        let mut pending_dependencies: Vec<usize> = nodes
            .iter()
            .map(|node| {
                node.children()
                    .filter(|child| graph.contains(child))
                    .count()
            })
            .collect();

        // dependents[i] = positions of nodes that depend on node i
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        for (i, node) in nodes.iter().enumerate() {
            for child in node.children() {
                if let Some(position) = graph.position(child) {
                    dependents[position].push(i);
                }
            }
        }

        let mut ready: VecDeque<usize> = pending_dependencies
            .iter()
            .enumerate()
            .filter(|(_, count)| **count == 0)
            .map(|(i, _)| i)
            .collect();

        let mut order = Vec::with_capacity(nodes.len());
        while let Some(i) = ready.pop_front() {
            order.push(nodes[i].package().clone());
            for &dependent in &dependents[i] {
                pending_dependencies[dependent] -= 1;
                if pending_dependencies[dependent] == 0 {
                    ready.push_back(dependent);
                }
            }
        }

        (order.len() == nodes.len()).then_some(order)
    }
}
