use crate::adapters::outbound::renderers::{AsciiTreeRenderer, DotRenderer};
use crate::ports::outbound::TreeRenderer;

/// Renderer type enumeration for factory pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererType {
    /// Indented text tree for the terminal
    Ascii,
    /// Graphviz source, turned into an image by `dot`
    Dot,
}

/// Factory for creating tree renderers
pub struct RendererFactory;

impl RendererFactory {
    pub fn create(renderer_type: RendererType) -> Box<dyn TreeRenderer> {
        match renderer_type {
            RendererType::Ascii => Box::new(AsciiTreeRenderer::new()),
            RendererType::Dot => Box::new(DotRenderer::new()),
        }
    }
}
