use crate::core::{Rect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DotPrimitive, LinePrimitive, TextPrimitive};

/// Marker bubble descriptor: a filled rounded box plus its positioned texts.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerBubble {
    pub bounds: Rect,
    pub alpha: u8,
    pub background: Color,
    pub texts: Vec<TextPrimitive>,
}

impl MarkerBubble {
    pub fn validate(&self) -> ChartResult<()> {
        if self.bounds.width() <= 0.0 || self.bounds.height() <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker bubble must have a positive size".to_owned(),
            ));
        }
        self.background.validate()?;
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Primitives are listed in paint order: axis labels, grid, marker line,
/// series lines, marker dots, y labels, bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub dots: Vec<DotPrimitive>,
    pub bubble: Option<MarkerBubble>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            lines: Vec::new(),
            texts: Vec::new(),
            dots: Vec::new(),
            bubble: None,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: f64::from(self.viewport.width),
                height: f64::from(self.viewport.height),
            });
        }

        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        for dot in &self.dots {
            dot.validate()?;
        }
        if let Some(bubble) = &self.bubble {
            bubble.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.texts.is_empty() && self.dots.is_empty() && self.bubble.is_none()
    }
}
