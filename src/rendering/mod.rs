pub mod annotation_renderer;
pub mod color;
pub mod font;

pub use annotation_renderer::AnnotationRenderer;
pub use color::ColorAssigner;
pub use font::{FontSource, LabelFont};
