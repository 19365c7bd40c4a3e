mod frame;
mod null_renderer;
mod pool;
mod primitives;

pub use frame::{MarkerBubble, RenderFrame};
pub use null_renderer::NullRenderer;
pub use pool::ScratchPool;
pub use primitives::{Color, DotPrimitive, LinePrimitive, TextHAlign, TextPrimitive};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart state and gesture handling.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
