mod frame;
mod null_renderer;
mod primitives;
mod style;
mod svg_renderer;

pub use frame::ChartFrame;
pub use null_renderer::{FrameTally, NullRenderer};
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use style::RenderStyle;
pub use svg_renderer::SvgRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `ChartFrame` so drawing code stays
/// isolated from classification, aggregation and scale logic.
pub trait Renderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()>;
}
