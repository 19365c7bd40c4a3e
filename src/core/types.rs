use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Host surface size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Axis-aligned rectangle in surface coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Returns `true` when `other` has no horizontal overlap with `self`.
    #[must_use]
    pub fn is_horizontally_outside(self, other: Rect) -> bool {
        self.right < other.left || self.left > other.right
    }

    /// Validates the rectangle as a drawing area: finite edges, positive size.
    pub fn validate(self) -> ChartResult<Self> {
        let finite = [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|edge| edge.is_finite());
        if !finite || self.width() <= 0.0 || self.height() <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(self)
    }
}

/// Normalized visible fraction of the x range, `0 <= from < to <= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionWindow {
    from: f64,
    to: f64,
}

impl Default for SelectionWindow {
    fn default() -> Self {
        Self { from: 0.0, to: 1.0 }
    }
}

impl SelectionWindow {
    pub fn new(from: f64, to: f64) -> ChartResult<Self> {
        if !from.is_finite() || !to.is_finite() || from < 0.0 || to > 1.0 || from >= to {
            return Err(ChartError::InvalidSelection { from, to });
        }
        Ok(Self { from, to })
    }

    #[must_use]
    pub fn from(self) -> f64 {
        self.from
    }

    #[must_use]
    pub fn to(self) -> f64 {
        self.to
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.to - self.from
    }
}
