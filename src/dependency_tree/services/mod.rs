pub mod graph_builder;
pub mod load_order;
pub mod version_resolver;

pub use graph_builder::{BuildOutcome, CancelFlag, GraphBuilder, DEFAULT_CONCURRENCY};
pub use load_order::LoadOrder;
pub use version_resolver::VersionResolver;
