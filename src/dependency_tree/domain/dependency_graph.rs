use super::PackageRef;
use std::collections::HashMap;

/// "from declares a dependency on to, originally specified as declared_spec"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    from: PackageRef,
    to: PackageRef,
    declared_spec: String,
}

impl DependencyEdge {
    pub fn new(from: PackageRef, to: PackageRef, declared_spec: impl Into<String>) -> Self {
        Self {
            from,
            to,
            declared_spec: declared_spec.into(),
        }
    }

    pub fn from(&self) -> &PackageRef {
        &self.from
    }

    pub fn to(&self) -> &PackageRef {
        &self.to
    }

    pub fn declared_spec(&self) -> &str {
        &self.declared_spec
    }
}

/// How far a node was expanded during the build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeStatus {
    /// Metadata was fetched and every declared dependency became an edge
    Resolved,
    /// The node sits at the depth limit; its dependencies were not followed
    DepthTruncated,
    /// Metadata could not be obtained; the node has no children
    Unresolved { reason: String },
}

/// One package release in the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    package: PackageRef,
    resolved_version: Option<String>,
    depth: usize,
    status: NodeStatus,
    dependencies: Vec<DependencyEdge>,
}

impl GraphNode {
    /// A fully expanded node. `dependencies` must be in registry declaration order.
    pub fn resolved(
        package: PackageRef,
        depth: usize,
        resolved_version: impl Into<String>,
        dependencies: Vec<DependencyEdge>,
    ) -> Self {
        Self {
            package,
            resolved_version: Some(resolved_version.into()),
            depth,
            status: NodeStatus::Resolved,
            dependencies,
        }
    }

    /// A node left unexpanded because it reached the depth limit
    pub fn truncated(package: PackageRef, depth: usize, resolved_version: Option<String>) -> Self {
        Self {
            package,
            resolved_version,
            depth,
            status: NodeStatus::DepthTruncated,
            dependencies: Vec::new(),
        }
    }

    pub fn unresolved(package: PackageRef, depth: usize, reason: impl Into<String>) -> Self {
        Self {
            package,
            resolved_version: None,
            depth,
            status: NodeStatus::Unresolved {
                reason: reason.into(),
            },
            dependencies: Vec::new(),
        }
    }

    pub fn package(&self) -> &PackageRef {
        &self.package
    }

    /// Concrete version reported by the registry (differs from the requested
    /// version when a dist-tag was requested)
    pub fn resolved_version(&self) -> Option<&str> {
        self.resolved_version.as_deref()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn status(&self) -> &NodeStatus {
        &self.status
    }

    pub fn is_truncated(&self) -> bool {
        self.status == NodeStatus::DepthTruncated
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self.status, NodeStatus::Unresolved { .. })
    }

    /// Outgoing edges in registry declaration order
    pub fn dependencies(&self) -> &[DependencyEdge] {
        &self.dependencies
    }

    /// Looks up the child a dependency name resolved to
    pub fn child(&self, dependency_name: &str) -> Option<&PackageRef> {
        self.dependencies
            .iter()
            .find(|edge| edge.to().name() == dependency_name)
            .map(DependencyEdge::to)
    }

    pub fn children(&self) -> impl Iterator<Item = &PackageRef> {
        self.dependencies.iter().map(DependencyEdge::to)
    }
}

/// DependencyGraph aggregate: every node reachable from the root within the
/// depth limit, each `(name, version)` pair stored exactly once.
///
/// Nodes are kept in discovery (breadth-first) order. Edges refer to their
/// target by `PackageRef`, so a package reached along several paths is a
/// single shared node. The graph is immutable once built.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    root: PackageRef,
    nodes: Vec<GraphNode>,
    index: HashMap<PackageRef, usize>,
}

impl DependencyGraph {
    /// Assembles a graph from nodes in discovery order.
    ///
    /// If a package appears more than once the first node wins.
    pub fn new(root: PackageRef, nodes: Vec<GraphNode>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        let mut unique = Vec::with_capacity(nodes.len());
        for node in nodes {
            if index.contains_key(node.package()) {
                continue;
            }
            index.insert(node.package().clone(), unique.len());
            unique.push(node);
        }

        Self {
            root,
            nodes: unique,
            index,
        }
    }

    pub fn root(&self) -> &PackageRef {
        &self.root
    }

    pub fn root_node(&self) -> Option<&GraphNode> {
        self.node(&self.root)
    }

    pub fn node(&self, package: &PackageRef) -> Option<&GraphNode> {
        self.index.get(package).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, package: &PackageRef) -> bool {
        self.index.contains_key(package)
    }

    /// Position of a node in discovery order
    pub fn position(&self, package: &PackageRef) -> Option<usize> {
        self.index.get(package).copied()
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.nodes.iter().flat_map(|node| node.dependencies().iter())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.dependencies().len()).sum()
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(GraphNode::depth).max().unwrap_or(0)
    }

    pub fn unresolved_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_unresolved()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &PackageRef, to: &PackageRef) -> DependencyEdge {
        DependencyEdge::new(from.clone(), to.clone(), to.version())
    }

    #[test]
    fn test_dependency_graph_new() {
        let a = PackageRef::new("a", "1.0.0");
        let b = PackageRef::new("b", "2.0.0");

        let graph = DependencyGraph::new(
            a.clone(),
            vec![
                GraphNode::resolved(a.clone(), 0, "1.0.0", vec![edge(&a, &b)]),
                GraphNode::resolved(b.clone(), 1, "2.0.0", vec![]),
            ],
        );

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.max_depth(), 1);
        assert_eq!(graph.root_node().unwrap().package(), &a);
        assert_eq!(graph.position(&b), Some(1));
        assert_eq!(graph.node(&a).unwrap().child("b"), Some(&b));
        assert!(graph.node(&a).unwrap().child("c").is_none());
    }

    #[test]
    fn test_dependency_graph_keeps_first_duplicate() {
        let a = PackageRef::new("a", "1.0.0");

        let graph = DependencyGraph::new(
            a.clone(),
            vec![
                GraphNode::resolved(a.clone(), 0, "1.0.0", vec![]),
                GraphNode::truncated(a.clone(), 3, None),
            ],
        );

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node(&a).unwrap().depth(), 0);
    }

    #[test]
    fn test_node_status_helpers() {
        let package = PackageRef::new("x", "1.0.0");

        let truncated = GraphNode::truncated(package.clone(), 2, Some("1.0.0".to_string()));
        assert!(truncated.is_truncated());
        assert!(!truncated.is_unresolved());
        assert_eq!(truncated.resolved_version(), Some("1.0.0"));

        let unresolved = GraphNode::unresolved(package, 1, "not found");
        assert!(unresolved.is_unresolved());
        assert_eq!(
            unresolved.status(),
            &NodeStatus::Unresolved {
                reason: "not found".to_string()
            }
        );
        assert!(unresolved.dependencies().is_empty());
    }

    #[test]
    fn test_children_preserve_declaration_order() {
        let root = PackageRef::new("root", "1.0.0");
        let z = PackageRef::new("z", "1.0.0");
        let a = PackageRef::new("a", "1.0.0");
        let node = GraphNode::resolved(
            root.clone(),
            0,
            "1.0.0",
            vec![edge(&root, &z), edge(&root, &a)],
        );

        let names: Vec<&str> = node.children().map(PackageRef::name).collect();
        assert_eq!(names, vec!["z", "a"]);
    }

    #[test]
    fn test_empty_graph_counts() {
        let graph = DependencyGraph::new(PackageRef::new("a", "1.0.0"), vec![]);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.max_depth(), 0);
        assert!(graph.root_node().is_none());
    }
}
