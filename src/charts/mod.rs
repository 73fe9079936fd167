//! Charts module - Surface model, chart rendering and export

pub mod export;
mod renderer;
mod surface;

pub use renderer::ChartRenderer;
pub use surface::{arrowhead, text_origin, Anchor, Shape, Surface};
