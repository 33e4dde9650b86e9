//! npm-deptree - dependency tree explorer for npm-style registries
//!
//! This library builds the dependency graph of a package from registry
//! metadata, up to a bounded depth, and renders it as an ASCII tree or as
//! Graphviz DOT. It follows a hexagonal architecture.
//!
//! # Architecture
//!
//! - **Domain Layer** (`dependency_tree`): graph model, version resolution and the graph builder
//! - **Application Layer** (`application`): use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): registry client, fixture source, renderers, console
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use npm_deptree::prelude::*;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<()> {
//! let client = NpmRegistryClient::new(DEFAULT_REGISTRY_URL, Duration::from_secs(10))?;
//! let source = CachingMetadataSource::new(RetryingMetadataSource::new(client, 2));
//! let use_case = BuildDependencyTreeUseCase::new(source, StderrProgressReporter::new());
//!
//! let request = BuildTreeRequest::builder("express").max_depth(3).build()?;
//! let response = use_case.execute(request).await?;
//!
//! let output = AsciiTreeRenderer::new().render(&response.graph, &response.warnings)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod dependency_tree;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, FixtureMetadataSource, StdoutPresenter,
    };
    pub use crate::adapters::outbound::network::{
        CachingMetadataSource, NpmRegistryClient, RetryingMetadataSource, DEFAULT_REGISTRY_URL,
    };
    pub use crate::adapters::outbound::renderers::{AsciiTreeRenderer, DotRenderer};
    pub use crate::application::dto::{BuildTreeRequest, BuildTreeResponse};
    pub use crate::application::use_cases::BuildDependencyTreeUseCase;
    pub use crate::dependency_tree::domain::{
        BuildWarning, DependencyEdge, DependencyGraph, GraphNode, NodeStatus, PackageName,
        PackageRef,
    };
    pub use crate::dependency_tree::services::{
        CancelFlag, GraphBuilder, LoadOrder, VersionResolver,
    };
    pub use crate::ports::outbound::{
        MetadataSource, OutputPresenter, PackageMetadata, ProgressReporter, TreeRenderer,
    };
    pub use crate::shared::Result;
}
