use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

fn default_checked() -> bool {
    true
}

/// One named y-series sharing the parent series' x values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub label: String,
    pub color: Color,
    pub y_values: Vec<f64>,
    #[serde(default = "default_checked")]
    pub checked: bool,
}

impl Line {
    #[must_use]
    pub fn new(label: impl Into<String>, color: Color, y_values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            color,
            y_values,
            checked: true,
        }
    }

    #[must_use]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

/// Shared ascending x values plus one or more lines of equal length.
///
/// Construct through [`Series::new`]; deserialized values are re-validated
/// when bound to a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    x_values: Vec<f64>,
    lines: Vec<Line>,
}

impl Series {
    pub fn new(x_values: Vec<f64>, lines: Vec<Line>) -> ChartResult<Self> {
        let series = Self { x_values, lines };
        series.validate()?;
        Ok(series)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.lines.is_empty() {
            return Err(ChartError::MalformedSeries(
                "series must contain at least one line".to_owned(),
            ));
        }
        if self.x_values.len() < 2 {
            return Err(ChartError::MalformedSeries(format!(
                "series needs at least 2 points, got {}",
                self.x_values.len()
            )));
        }
        if self.x_values.iter().any(|x| !x.is_finite()) {
            return Err(ChartError::MalformedSeries(
                "x values must be finite".to_owned(),
            ));
        }
        if self.x_values.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(ChartError::MalformedSeries(
                "x values must be sorted ascending".to_owned(),
            ));
        }
        if self.x_max() <= self.x_min() {
            return Err(ChartError::MalformedSeries(
                "x range must be non-empty".to_owned(),
            ));
        }

        for line in &self.lines {
            if line.y_values.len() != self.x_values.len() {
                return Err(ChartError::MalformedSeries(format!(
                    "line `{}` has {} values, expected {}",
                    line.label,
                    line.y_values.len(),
                    self.x_values.len()
                )));
            }
            if line.y_values.iter().any(|y| !y.is_finite()) {
                return Err(ChartError::MalformedSeries(format!(
                    "line `{}` contains non-finite values",
                    line.label
                )));
            }
            line.color.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x_values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_values.is_empty()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn x_min(&self) -> f64 {
        self.x_values.first().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn x_max(&self) -> f64 {
        self.x_values.last().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn x_range(&self) -> f64 {
        self.x_max() - self.x_min()
    }

    #[must_use]
    pub fn any_checked(&self) -> bool {
        self.lines.iter().any(|line| line.checked)
    }

    pub(crate) fn set_checked(&mut self, index: usize, checked: bool) -> ChartResult<bool> {
        let count = self.lines.len();
        let line = self.lines.get_mut(index).ok_or_else(|| {
            ChartError::InvalidData(format!("line index {index} out of range (lines: {count})"))
        })?;
        if line.checked == checked {
            return Ok(false);
        }
        line.checked = checked;
        Ok(true)
    }
}
