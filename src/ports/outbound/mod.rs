/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (registry, file system, console).
pub mod metadata_source;
pub mod output_presenter;
pub mod progress_reporter;
pub mod tree_renderer;

pub use metadata_source::{MetadataSource, PackageMetadata};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use tree_renderer::TreeRenderer;
