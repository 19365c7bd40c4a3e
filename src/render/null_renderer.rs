use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: u64,
    pub last_line_count: usize,
    pub last_text_count: usize,
    pub last_dot_count: usize,
    pub last_had_bubble: bool,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_line_count = frame.lines.len();
        self.last_text_count = frame.texts.len();
        self.last_dot_count = frame.dots.len();
        self.last_had_bubble = frame.bubble.is_some();
        Ok(())
    }
}
