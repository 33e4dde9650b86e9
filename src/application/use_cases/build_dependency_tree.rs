use crate::application::dto::{BuildTreeRequest, BuildTreeResponse};
use crate::dependency_tree::services::{CancelFlag, GraphBuilder, LoadOrder};
use crate::ports::outbound::{MetadataSource, ProgressReporter};
use crate::shared::error::BuildError;
use crate::shared::Result;

/// BuildDependencyTreeUseCase - builds the dependency graph for one request
///
/// Orchestrates the graph builder over an injected metadata source, enforces
/// the overall build timeout, and reports progress, warnings and cycles
/// through the injected reporter.
///
/// # Type Parameters
/// * `S` - MetadataSource implementation (live registry or fixture)
/// * `PR` - ProgressReporter implementation
pub struct BuildDependencyTreeUseCase<S, PR> {
    metadata_source: S,
    progress_reporter: PR,
}

impl<S, PR> BuildDependencyTreeUseCase<S, PR>
where
    S: MetadataSource,
    PR: ProgressReporter,
{
    /// Creates a new BuildDependencyTreeUseCase with injected dependencies
    pub fn new(metadata_source: S, progress_reporter: PR) -> Self {
        Self {
            metadata_source,
            progress_reporter,
        }
    }

    /// Executes the build
    ///
    /// # Errors
    /// A `BuildError` (fatal root failure or timeout) wrapped in `anyhow`;
    /// use `ExitCode::for_error` to classify it.
    pub async fn execute(&self, request: BuildTreeRequest) -> Result<BuildTreeResponse> {
        self.execute_with_cancel(request, CancelFlag::new()).await
    }

    /// Executes the build, stopping early once `cancel_flag` is raised
    pub async fn execute_with_cancel(
        &self,
        request: BuildTreeRequest,
        cancel_flag: CancelFlag,
    ) -> Result<BuildTreeResponse> {
        let root = request.root();
        self.progress_reporter.report(&format!(
            "🌳 Building dependency tree for {} (max depth {})...",
            root, request.max_depth
        ));

        let progress = |current: usize, total: usize| {
            self.progress_reporter.report_progress(current, total, None);
        };
        let builder = GraphBuilder::new(&self.metadata_source)
            .with_concurrency(request.concurrency)
            .with_cancel_flag(cancel_flag)
            .with_progress(&progress);

        let build = builder.build(root, request.max_depth);
        let outcome = match request.build_timeout {
            // Timing out drops the build, discarding lookups still in flight
            Some(limit) => tokio::time::timeout(limit, build)
                .await
                .unwrap_or(Err(BuildError::TimedOut {
                    seconds: limit.as_secs(),
                })),
            None => build.await,
        };
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(error) => {
                self.progress_reporter.report_error("❌ Build aborted");
                return Err(error.into());
            }
        };

        let graph = outcome.graph;
        self.progress_reporter.report_completion(&format!(
            "✅ Resolved {} package(s) and {} dependency edge(s)",
            graph.node_count(),
            graph.edge_count()
        ));
        if let Some(root_node) = graph.root_node() {
            self.progress_reporter.report(&format!(
                "   - Direct dependencies: {}",
                root_node.dependencies().len()
            ));
        }
        self.progress_reporter
            .report(&format!("   - Deepest level: {}", graph.max_depth()));

        for warning in &outcome.warnings {
            self.progress_reporter
                .report_error(&format!("⚠️  Warning: {}", warning));
        }

        let cycle_edges = LoadOrder::cycle_edges(&graph);
        if !cycle_edges.is_empty() {
            self.progress_reporter
                .report_error("🔁 Cyclic dependencies detected:");
            for edge in &cycle_edges {
                self.progress_reporter
                    .report_error(&format!("   {} -> {}", edge.from(), edge.to()));
            }
        }

        let install_order = LoadOrder::install_order(&graph);

        Ok(BuildTreeResponse::new(
            graph,
            outcome.warnings,
            cycle_edges,
            install_order,
        ))
    }
}
