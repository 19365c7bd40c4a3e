use std::ops::RangeInclusive;

use tracing::{debug, trace};

use crate::animation::{AnimatedValue, AnimationConfig, OPAQUE};
use crate::core::rmq::{RangeMaxQuery, RmqStrategy};
use crate::core::search::{Rounding, search_sorted, search_sorted_in};
use crate::core::{Rect, SelectionWindow, Series};
use crate::error::{ChartError, ChartResult};

/// Bound series, selection and viewport plus everything derived from them.
///
/// Derived fields are recomputed eagerly whenever an input changes, so reads
/// never observe a stale combination.
#[derive(Debug, Clone)]
pub struct ChartState {
    series: Option<Series>,
    generation: u64,
    rmq: RangeMaxQuery,
    bounds: Option<Rect>,
    horizontal_padding_px: f64,
    selection: SelectionWindow,

    selection_start_value: f64,
    selection_end_value: f64,
    selection_width: f64,
    first_index_inside: usize,
    last_index_inside: usize,
    first_visible_index: usize,
    last_visible_index: usize,
    max_visible_entry: f64,

    chart_height: AnimatedValue,
    line_alphas: Vec<AnimatedValue>,
}

impl ChartState {
    #[must_use]
    pub fn new(strategy: RmqStrategy) -> Self {
        Self {
            series: None,
            generation: 0,
            rmq: RangeMaxQuery::new(strategy),
            bounds: None,
            horizontal_padding_px: 0.0,
            selection: SelectionWindow::default(),
            selection_start_value: 0.0,
            selection_end_value: 0.0,
            selection_width: 0.0,
            first_index_inside: 0,
            last_index_inside: 0,
            first_visible_index: 0,
            last_visible_index: 0,
            max_visible_entry: 0.0,
            chart_height: AnimatedValue::default(),
            line_alphas: Vec::new(),
        }
    }

    /// Replaces the bound series and resets all derived state.
    pub fn bind_series(&mut self, series: Series) -> ChartResult<()> {
        series.validate()?;
        self.rmq.build(&series);
        self.line_alphas = series
            .lines()
            .iter()
            .map(|line| AnimatedValue::new(if line.checked { OPAQUE } else { 0.0 }))
            .collect();
        self.series = Some(series);
        self.generation += 1;
        self.max_visible_entry = 0.0;
        self.recompute();
        self.chart_height.set(self.max_visible_entry);

        debug!(
            generation = self.generation,
            points = self.series.as_ref().map_or(0, Series::len),
            "series bound"
        );
        Ok(())
    }

    /// Stores a new selection. The chart height is left for the caller to animate.
    pub fn set_selection(&mut self, from: f64, to: f64) -> ChartResult<()> {
        self.selection = SelectionWindow::new(from, to)?;
        self.recompute();
        trace!(from, to, max = self.max_visible_entry, "selection updated");
        Ok(())
    }

    /// Rejects bounds that leave no content width after horizontal padding.
    pub fn set_viewport_bounds(&mut self, bounds: Rect) -> ChartResult<()> {
        let bounds = bounds.validate()?;
        check_content_width(bounds, self.horizontal_padding_px)?;
        self.bounds = Some(bounds);
        self.recompute();
        self.chart_height.set(self.max_visible_entry);
        Ok(())
    }

    pub fn set_horizontal_padding(&mut self, padding_px: f64) -> ChartResult<()> {
        if !padding_px.is_finite() || padding_px < 0.0 {
            return Err(ChartError::InvalidData(
                "horizontal padding must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(bounds) = self.bounds {
            check_content_width(bounds, padding_px)?;
        }
        self.horizontal_padding_px = padding_px;
        self.recompute();
        self.chart_height.set(self.max_visible_entry);
        Ok(())
    }

    /// Toggles one line; returns whether the flag actually changed.
    pub fn set_line_checked(&mut self, index: usize, checked: bool) -> ChartResult<bool> {
        let series = self
            .series
            .as_mut()
            .ok_or_else(|| ChartError::InvalidData("no series bound".to_owned()))?;
        if !series.set_checked(index, checked)? {
            return Ok(false);
        }
        self.refresh_max_visible_entry();
        debug!(index, checked, max = self.max_visible_entry, "line toggled");
        Ok(true)
    }

    fn recompute(&mut self) {
        let Some(series) = &self.series else {
            return;
        };
        let xs = series.x_values();
        let x_min = series.x_min();
        let x_range = series.x_range();

        self.selection_start_value = x_min + self.selection.from() * x_range;
        self.selection_end_value = x_min + self.selection.to() * x_range;
        self.selection_width = self.selection.span() * x_range;

        let first = search_sorted(xs, self.selection_start_value, Rounding::Up);
        let last = search_sorted(xs, self.selection_end_value, Rounding::Down);
        // A selection narrower than the sample spacing brackets its neighbors.
        (self.first_index_inside, self.last_index_inside) = if first <= last {
            (first, last)
        } else {
            (last, first)
        };

        let window_width = self.window_width();
        let padding_value = if window_width > 0.0 {
            self.selection_width / window_width * self.horizontal_padding_px
        } else {
            0.0
        };
        self.first_visible_index = search_sorted(
            xs,
            self.selection_start_value - padding_value,
            Rounding::Down,
        );
        self.last_visible_index =
            search_sorted(xs, self.selection_end_value + padding_value, Rounding::Up);

        self.refresh_max_visible_entry();
    }

    fn refresh_max_visible_entry(&mut self) {
        let Some(series) = &self.series else {
            return;
        };
        let max = self
            .rmq
            .query_max(series, self.first_visible_index, self.last_visible_index);
        // Non-positive results keep the previous scale instead of collapsing it.
        if max > 0.0 {
            self.max_visible_entry = max;
        }
    }

    /// Nearest sample index to `x`, clamped to the selection's index bounds.
    ///
    /// Equidistant candidates resolve to the lower index.
    #[must_use]
    pub fn find_nearest_index(&self, x: f64) -> Option<usize> {
        let series = self.series.as_ref()?;
        let xs = series.x_values();
        let upper = xs.partition_point(|value| *value < x);
        let nearest = if upper == 0 {
            0
        } else if upper >= xs.len() {
            xs.len() - 1
        } else {
            let lower = upper - 1;
            if x - xs[lower] <= xs[upper] - x {
                lower
            } else {
                upper
            }
        };
        Some(nearest.clamp(self.first_index_inside, self.last_index_inside))
    }

    /// Binary search for `x` restricted to the selection's index bounds.
    #[must_use]
    pub fn find_index_inside_selection(&self, x: f64, rounding: Rounding) -> Option<usize> {
        let series = self.series.as_ref()?;
        Some(search_sorted_in(
            series.x_values(),
            x,
            rounding,
            self.first_index_inside,
            self.last_index_inside,
        ))
    }

    /// Starts a transition of the chart height toward the max visible entry.
    ///
    /// Returns `false` when the target is unchanged.
    pub fn animate_chart_height(&mut self, now_ms: f64, animation: AnimationConfig) -> bool {
        if self.chart_height.target() == self.max_visible_entry {
            return false;
        }
        self.chart_height.animate_to(
            self.max_visible_entry,
            now_ms,
            animation.duration_ms,
            animation.easing,
        );
        true
    }

    /// Snaps both the chart height and the max visible entry to `height`.
    pub fn restore_chart_height(&mut self, height: f64) {
        if height.is_finite() && height > 0.0 {
            self.max_visible_entry = height;
            self.chart_height.set(height);
        }
    }

    /// Fades the line toward its checked state; no-op when already heading there.
    pub fn animate_line_alpha(&mut self, index: usize, now_ms: f64, animation: AnimationConfig) {
        let checked = self
            .series
            .as_ref()
            .and_then(|series| series.line(index))
            .is_some_and(|line| line.checked);
        let Some(alpha) = self.line_alphas.get_mut(index) else {
            return;
        };
        let target = if checked { OPAQUE } else { 0.0 };
        if alpha.target() != target {
            alpha.animate_to(target, now_ms, animation.duration_ms, animation.easing);
        }
    }

    /// Advances chart height and line fades; returns `true` while any is running.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let mut running = self.chart_height.tick(now_ms);
        for alpha in &mut self.line_alphas {
            running |= alpha.tick(now_ms);
        }
        running
    }

    pub fn jump_to_target(&mut self) {
        self.chart_height.finish();
        for alpha in &mut self.line_alphas {
            alpha.finish();
        }
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.series.is_some() && self.bounds.is_some()
    }

    #[must_use]
    pub fn series(&self) -> Option<&Series> {
        self.series.as_ref()
    }

    /// Increments on every bind; stands in for series identity.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn rmq_strategy(&self) -> RmqStrategy {
        self.rmq.strategy()
    }

    #[must_use]
    pub fn selection(&self) -> SelectionWindow {
        self.selection
    }

    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    #[must_use]
    pub fn horizontal_padding_px(&self) -> f64 {
        self.horizontal_padding_px
    }

    #[must_use]
    pub fn window_width(&self) -> f64 {
        self.bounds.map_or(0.0, Rect::width)
    }

    #[must_use]
    pub fn window_height(&self) -> f64 {
        self.bounds.map_or(0.0, Rect::height)
    }

    /// Drawable width between the horizontal paddings.
    #[must_use]
    pub fn content_width(&self) -> f64 {
        (self.window_width() - 2.0 * self.horizontal_padding_px).max(0.0)
    }

    #[must_use]
    pub fn selection_start_value(&self) -> f64 {
        self.selection_start_value
    }

    #[must_use]
    pub fn selection_end_value(&self) -> f64 {
        self.selection_end_value
    }

    #[must_use]
    pub fn selection_width(&self) -> f64 {
        self.selection_width
    }

    #[must_use]
    pub fn selection_index_range(&self) -> RangeInclusive<usize> {
        self.first_index_inside..=self.last_index_inside
    }

    /// Selection index range widened by the horizontal padding.
    #[must_use]
    pub fn visible_index_range(&self) -> RangeInclusive<usize> {
        self.first_visible_index..=self.last_visible_index
    }

    #[must_use]
    pub fn max_visible_entry(&self) -> f64 {
        self.max_visible_entry
    }

    /// Current, possibly mid-transition, y extent of the plot.
    #[must_use]
    pub fn chart_height(&self) -> f64 {
        self.chart_height.value()
    }

    #[must_use]
    pub fn target_chart_height(&self) -> f64 {
        self.chart_height.target()
    }

    #[must_use]
    pub fn line_alpha(&self, index: usize) -> u8 {
        self.line_alphas.get(index).map_or(0, AnimatedValue::alpha)
    }

    #[must_use]
    pub fn any_checked(&self) -> bool {
        self.series.as_ref().is_some_and(Series::any_checked)
    }
}

fn check_content_width(bounds: Rect, padding_px: f64) -> ChartResult<()> {
    if 2.0 * padding_px >= bounds.width() {
        return Err(ChartError::InvalidViewport {
            width: bounds.width() - 2.0 * padding_px,
            height: bounds.height(),
        });
    }
    Ok(())
}
