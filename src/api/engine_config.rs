use serde::{Deserialize, Serialize};

use crate::animation::AnimationConfig;
use crate::axis::XAxisMetrics;
use crate::core::{Rect, RmqStrategy, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::BubbleMetrics;

/// Axis label geometry in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
    /// Space kept between the chart top and the highest grid row.
    #[serde(default = "default_y_top_padding_px")]
    pub y_top_padding_px: f64,
    /// Gap between a grid row and the baseline of its label.
    #[serde(default = "default_y_label_bottom_padding_px")]
    pub y_label_bottom_padding_px: f64,
    /// Width reserved for one x label (sized for a sample such as "Nov 17").
    #[serde(default = "default_x_label_width_px")]
    pub x_label_width_px: f64,
    #[serde(default = "default_x_label_spacing_px")]
    pub x_label_spacing_px: f64,
    /// Height of the x label strip below the plot.
    #[serde(default = "default_x_axis_height_px")]
    pub x_axis_height_px: f64,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            font_size_px: default_font_size_px(),
            y_top_padding_px: default_y_top_padding_px(),
            y_label_bottom_padding_px: default_y_label_bottom_padding_px(),
            x_label_width_px: default_x_label_width_px(),
            x_label_spacing_px: default_x_label_spacing_px(),
            x_axis_height_px: default_x_axis_height_px(),
        }
    }
}

impl AxisConfig {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("font_size_px", self.font_size_px),
            ("x_label_width_px", self.x_label_width_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "axis `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("y_top_padding_px", self.y_top_padding_px),
            ("y_label_bottom_padding_px", self.y_label_bottom_padding_px),
            ("x_label_spacing_px", self.x_label_spacing_px),
            ("x_axis_height_px", self.x_axis_height_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "axis `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn x_axis_metrics(self) -> XAxisMetrics {
        XAxisMetrics {
            label_width_px: self.x_label_width_px,
            label_spacing_px: self.x_label_spacing_px,
        }
    }
}

/// Stroke sizes for series lines, grid and marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeConfig {
    #[serde(default = "default_line_width_px")]
    pub line_width_px: f64,
    #[serde(default = "default_grid_line_width_px")]
    pub grid_line_width_px: f64,
    #[serde(default = "default_marker_line_width_px")]
    pub marker_line_width_px: f64,
    #[serde(default = "default_dot_radius_px")]
    pub dot_radius_px: f64,
    #[serde(default = "default_dot_stroke_width_px")]
    pub dot_stroke_width_px: f64,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            line_width_px: default_line_width_px(),
            grid_line_width_px: default_grid_line_width_px(),
            marker_line_width_px: default_marker_line_width_px(),
            dot_radius_px: default_dot_radius_px(),
            dot_stroke_width_px: default_dot_stroke_width_px(),
        }
    }
}

impl StrokeConfig {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("line_width_px", self.line_width_px),
            ("grid_line_width_px", self.grid_line_width_px),
            ("marker_line_width_px", self.marker_line_width_px),
            ("dot_radius_px", self.dot_radius_px),
            ("dot_stroke_width_px", self.dot_stroke_width_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "stroke `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub rmq_strategy: RmqStrategy,
    #[serde(default = "default_horizontal_padding_px")]
    pub horizontal_padding_px: f64,
    #[serde(default = "default_vertical_padding_px")]
    pub vertical_padding_px: f64,
    #[serde(default)]
    pub axis: AxisConfig,
    #[serde(default)]
    pub stroke: StrokeConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub bubble: BubbleMetrics,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            rmq_strategy: RmqStrategy::default(),
            horizontal_padding_px: default_horizontal_padding_px(),
            vertical_padding_px: default_vertical_padding_px(),
            axis: AxisConfig::default(),
            stroke: StrokeConfig::default(),
            animation: AnimationConfig::default(),
            bubble: BubbleMetrics::default(),
        }
    }

    #[must_use]
    pub fn with_rmq_strategy(mut self, strategy: RmqStrategy) -> Self {
        self.rmq_strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_horizontal_padding_px(mut self, padding_px: f64) -> Self {
        self.horizontal_padding_px = padding_px;
        self
    }

    #[must_use]
    pub fn with_vertical_padding_px(mut self, padding_px: f64) -> Self {
        self.vertical_padding_px = padding_px;
        self
    }

    #[must_use]
    pub fn with_axis(mut self, axis: AxisConfig) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: StrokeConfig) -> Self {
        self.stroke = stroke;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_bubble(mut self, bubble: BubbleMetrics) -> Self {
        self.bubble = bubble;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: f64::from(self.viewport.width),
                height: f64::from(self.viewport.height),
            });
        }
        if !self.horizontal_padding_px.is_finite() || self.horizontal_padding_px < 0.0 {
            return Err(ChartError::InvalidData(
                "horizontal padding must be finite and >= 0".to_owned(),
            ));
        }
        if !self.vertical_padding_px.is_finite() || self.vertical_padding_px < 0.0 {
            return Err(ChartError::InvalidData(
                "vertical padding must be finite and >= 0".to_owned(),
            ));
        }
        self.axis.validate()?;
        self.stroke.validate()?;
        self.animation.validate()?;
        self.bubble.validate()?;
        self.chart_bounds(self.viewport)?;
        Ok(self)
    }

    /// Plot rectangle for `viewport`: full width, minus the x label strip and vertical paddings.
    pub fn chart_bounds(&self, viewport: Viewport) -> ChartResult<Rect> {
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        Rect::new(
            0.0,
            self.vertical_padding_px,
            width,
            height - self.axis.x_axis_height_px - self.vertical_padding_px,
        )
        .validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()
    }
}

fn default_horizontal_padding_px() -> f64 {
    16.0
}

fn default_vertical_padding_px() -> f64 {
    4.0
}

fn default_font_size_px() -> f64 {
    13.0
}

fn default_y_top_padding_px() -> f64 {
    // Top margin, one label line and the label's bottom gap.
    8.0 + 13.0 + 8.0
}

fn default_y_label_bottom_padding_px() -> f64 {
    8.0
}

fn default_x_label_width_px() -> f64 {
    40.0
}

fn default_x_label_spacing_px() -> f64 {
    8.0
}

fn default_x_axis_height_px() -> f64 {
    24.0
}

fn default_line_width_px() -> f64 {
    2.0
}

fn default_grid_line_width_px() -> f64 {
    1.0
}

fn default_marker_line_width_px() -> f64 {
    2.0
}

fn default_dot_radius_px() -> f64 {
    4.0
}

fn default_dot_stroke_width_px() -> f64 {
    2.0
}
