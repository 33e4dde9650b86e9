use crate::dependency_tree::domain::{
    BuildWarning, DependencyEdge, DependencyGraph, GraphNode, PackageRef,
};
use crate::dependency_tree::services::VersionResolver;
use crate::ports::outbound::{MetadataSource, PackageMetadata};
use crate::shared::error::{AbortReason, BuildError, RegistryError};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Default number of registry lookups in flight at once
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Shared flag that stops a running build from issuing new lookups
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of a successful build: the graph plus every per-node failure
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub graph: DependencyGraph,
    pub warnings: Vec<BuildWarning>,
}

/// A package waiting in the work queue
struct Pending {
    package: PackageRef,
    /// Set when the dependency spec itself could not be resolved; such a
    /// package is recorded as unresolved without a lookup
    failure: Option<BuildWarning>,
}

/// Mutable state owned by the coordinating loop. Lookups never touch it.
struct Traversal {
    visited: HashSet<PackageRef>,
    nodes: Vec<GraphNode>,
    warnings: Vec<BuildWarning>,
    fetched: usize,
}

/// GraphBuilder service performing bounded, cycle-safe expansion of a
/// dependency tree
///
/// The traversal is breadth-first over an explicit work queue. Each depth
/// level is fetched concurrently (up to `concurrency` lookups in flight),
/// then results are recorded in queue order, so the final graph does not
/// depend on network completion order. Every `(name, version)` pair is
/// looked up at most once.
pub struct GraphBuilder<'a, S: MetadataSource + ?Sized> {
    source: &'a S,
    concurrency: usize,
    cancel_flag: CancelFlag,
    progress: Option<&'a dyn Fn(usize, usize)>,
}

impl<'a, S: MetadataSource + ?Sized> GraphBuilder<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            concurrency: DEFAULT_CONCURRENCY,
            cancel_flag: CancelFlag::new(),
            progress: None,
        }
    }

    /// Caps the number of concurrent lookups (at least one)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_cancel_flag(mut self, cancel_flag: CancelFlag) -> Self {
        self.cancel_flag = cancel_flag;
        self
    }

    /// Registers a callback receiving `(lookups completed, packages discovered)`
    pub fn with_progress(mut self, progress: &'a dyn Fn(usize, usize)) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Builds the dependency graph rooted at `root`
    ///
    /// Nodes at `max_depth` are kept but not expanded. The root itself is
    /// always looked up, even with `max_depth == 0`, so that a missing root
    /// is reported instead of silently rendering a lone node.
    ///
    /// # Errors
    /// - `BuildError::FatalBuildAbort` if the root version is unusable or the
    ///   root lookup fails for any reason
    /// - `BuildError::Cancelled` if the cancel flag was raised
    ///
    /// Failures for any other package become warnings on an unresolved node.
    pub async fn build(
        &self,
        root: PackageRef,
        max_depth: usize,
    ) -> Result<BuildOutcome, BuildError> {
        let root_version =
            VersionResolver::resolve_version(root.version()).map_err(|e| {
                BuildError::FatalBuildAbort {
                    root: root.clone(),
                    reason: AbortReason::UnresolvableRoot(e.to_string()),
                }
            })?;
        let root = PackageRef::new(root.name(), root_version);

        let mut traversal = Traversal {
            visited: HashSet::new(),
            nodes: Vec::new(),
            warnings: Vec::new(),
            fetched: 0,
        };
        let mut frontier = vec![Pending {
            package: root.clone(),
            failure: None,
        }];
        let mut depth = 0;

        while !frontier.is_empty() {
            if self.cancel_flag.is_cancelled() {
                return Err(BuildError::Cancelled);
            }

            // Already-visited packages are cycle or diamond collapses
            let level: Vec<Pending> = frontier
                .into_iter()
                .filter(|pending| traversal.visited.insert(pending.package.clone()))
                .collect();

            let at_limit = depth >= max_depth;
            let results = self.fetch_level(&level, depth, at_limit, &mut traversal).await?;

            if depth == 0 {
                if let Some(Err(error)) = results.first().and_then(Option::as_ref) {
                    return Err(Self::fatal(&root, error));
                }
            }

            frontier = self.record_level(level, results, depth, at_limit, &mut traversal);
            depth += 1;
        }

        Ok(BuildOutcome {
            graph: DependencyGraph::new(root, traversal.nodes),
            warnings: traversal.warnings,
        })
    }

    /// Looks up every package of one level that needs it, concurrently.
    ///
    /// The returned vector is indexed like `level`; `None` means no lookup
    /// was issued for that entry.
    async fn fetch_level(
        &self,
        level: &[Pending],
        depth: usize,
        at_limit: bool,
        traversal: &mut Traversal,
    ) -> Result<Vec<Option<Result<PackageMetadata, RegistryError>>>, BuildError> {
        let mut results: Vec<Option<Result<PackageMetadata, RegistryError>>> =
            level.iter().map(|_| None).collect();

        // Past the root, nodes at the limit are not looked up at all
        if at_limit && depth > 0 {
            return Ok(results);
        }

        let discovered = traversal.visited.len();
        let jobs = level
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.failure.is_none())
            .map(|(i, pending)| (i, &pending.package));

        let mut lookups = stream::iter(jobs)
            .map(|(i, package)| async move {
                let result = self
                    .source
                    .fetch_dependencies(package.name(), package.version())
                    .await;
                (i, result)
            })
            .buffer_unordered(self.concurrency);

        while let Some((i, result)) = lookups.next().await {
            results[i] = Some(result);
            traversal.fetched += 1;
            if let Some(progress) = self.progress {
                progress(traversal.fetched, discovered);
            }
            if self.cancel_flag.is_cancelled() {
                // Dropping the stream discards lookups still in flight
                return Err(BuildError::Cancelled);
            }
        }

        Ok(results)
    }

    /// Turns one level's lookup results into nodes, in queue order, and
    /// returns the next level's work queue
    fn record_level(
        &self,
        level: Vec<Pending>,
        results: Vec<Option<Result<PackageMetadata, RegistryError>>>,
        depth: usize,
        at_limit: bool,
        traversal: &mut Traversal,
    ) -> Vec<Pending> {
        let mut next = Vec::new();
        let mut queued: HashSet<PackageRef> = HashSet::new();

        for (pending, result) in level.into_iter().zip(results) {
            let package = pending.package;

            if let Some(warning) = pending.failure {
                traversal
                    .nodes
                    .push(GraphNode::unresolved(package, depth, warning.reason()));
                traversal.warnings.push(warning);
                continue;
            }

            let metadata = match result {
                None => {
                    traversal.nodes.push(GraphNode::truncated(package, depth, None));
                    continue;
                }
                Some(Err(error)) => {
                    let warning = BuildWarning::from_registry_error(package.clone(), &error);
                    traversal
                        .nodes
                        .push(GraphNode::unresolved(package, depth, error.to_string()));
                    traversal.warnings.push(warning);
                    continue;
                }
                Some(Ok(metadata)) => metadata,
            };

            if at_limit {
                traversal
                    .nodes
                    .push(GraphNode::truncated(package, depth, Some(metadata.version)));
                continue;
            }

            let mut edges = Vec::with_capacity(metadata.dependencies.len());
            for (dependency_name, spec) in metadata.dependencies {
                let (child, failure) = match VersionResolver::resolve_version(&spec) {
                    Ok(version) => (PackageRef::new(dependency_name, version), None),
                    Err(error) => {
                        let child = PackageRef::new(dependency_name, spec.trim());
                        let warning = BuildWarning::from_version_error(child.clone(), &error);
                        (child, Some(warning))
                    }
                };

                if !traversal.visited.contains(&child) && queued.insert(child.clone()) {
                    next.push(Pending {
                        package: child.clone(),
                        failure,
                    });
                }
                edges.push(DependencyEdge::new(package.clone(), child, spec));
            }

            traversal
                .nodes
                .push(GraphNode::resolved(package, depth, metadata.version, edges));
        }

        next
    }

    fn fatal(root: &PackageRef, error: &RegistryError) -> BuildError {
        let reason = match error {
            RegistryError::NotFound { .. } => AbortReason::RootNotFound,
            RegistryError::Network { details, .. } => {
                AbortReason::RegistryUnreachable(details.clone())
            }
            RegistryError::MalformedResponse { details, .. } => {
                AbortReason::MalformedRoot(details.clone())
            }
        };
        BuildError::FatalBuildAbort {
            root: root.clone(),
            reason,
        }
    }
}
