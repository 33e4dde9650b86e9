pub mod build_warning;
pub mod dependency_graph;
pub mod package_ref;

pub use build_warning::{BuildWarning, WarningKind};
pub use dependency_graph::{DependencyEdge, DependencyGraph, GraphNode, NodeStatus};
pub use package_ref::{PackageName, PackageRef};
