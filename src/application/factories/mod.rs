mod metadata_source_factory;
mod presenter_factory;
mod renderer_factory;

pub use metadata_source_factory::MetadataSourceFactory;
pub use presenter_factory::{PresenterFactory, PresenterType};
pub use renderer_factory::{RendererFactory, RendererType};
