use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::render::Color;

/// Colors for every non-series element of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartTheme {
    pub background: Color,
    pub grid_line: Color,
    pub axis_label: Color,
    pub marker_line: Color,
    pub bubble_background: Color,
    pub bubble_title: Color,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl ChartTheme {
    #[must_use]
    pub const fn light() -> Self {
        Self {
            background: Color::rgb(1.0, 1.0, 1.0),
            grid_line: Color::rgb(0.945, 0.945, 0.949),
            axis_label: Color::rgb(0.588, 0.635, 0.667),
            marker_line: Color::rgb(0.898, 0.918, 0.933),
            bubble_background: Color::rgb(1.0, 1.0, 1.0),
            bubble_title: Color::rgb(0.133, 0.133, 0.133),
        }
    }

    #[must_use]
    pub const fn dark() -> Self {
        Self {
            background: Color::rgb(0.114, 0.153, 0.200),
            grid_line: Color::rgb(0.094, 0.129, 0.169),
            axis_label: Color::rgb(0.357, 0.424, 0.490),
            marker_line: Color::rgb(0.075, 0.106, 0.137),
            bubble_background: Color::rgb(0.125, 0.169, 0.220),
            bubble_title: Color::rgb(0.898, 0.937, 0.961),
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        for color in [
            self.background,
            self.grid_line,
            self.axis_label,
            self.marker_line,
            self.bubble_background,
            self.bubble_title,
        ] {
            color.validate()?;
        }
        Ok(self)
    }
}
