use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::animation::{AnimatedValue, AnimationConfig, OPAQUE, to_alpha};
use crate::core::{ChartState, CoordinateTransformer, Rect};
use crate::interaction::BubbleMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkerVisibility {
    Visible,
    #[default]
    Gone,
}

/// Persistable snapshot of the marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerState {
    pub index: usize,
    /// Bubble offset from the marker line as a fraction of the bubble width.
    pub bubble_offset: f64,
    /// Alpha the marker is heading toward.
    pub alpha: u8,
    pub visibility: MarkerVisibility,
}

impl Default for MarkerState {
    fn default() -> Self {
        Self {
            index: 0,
            bubble_offset: BubbleMetrics::default().default_offset_ratio,
            alpha: 0,
            visibility: MarkerVisibility::Gone,
        }
    }
}

/// Resolves pointer positions to a sample index and tracks the marker's fade.
#[derive(Debug, Clone)]
pub struct MarkerLocator {
    metrics: BubbleMetrics,
    animation: AnimationConfig,
    index: usize,
    visibility: MarkerVisibility,
    alpha: AnimatedValue,
    any_checked: bool,
    bubble_touched: bool,
    index_changed: bool,
    bubble_offset: f64,
    bubble_bounds: Rect,
}

impl MarkerLocator {
    #[must_use]
    pub fn new(metrics: BubbleMetrics, animation: AnimationConfig) -> Self {
        Self {
            metrics,
            animation,
            index: 0,
            visibility: MarkerVisibility::Gone,
            alpha: AnimatedValue::new(0.0),
            any_checked: false,
            bubble_touched: false,
            index_changed: true,
            bubble_offset: metrics.default_offset_ratio,
            bubble_bounds: Rect::default(),
        }
    }

    /// Hides the marker after a new series was bound.
    pub fn reset(&mut self, state: &ChartState) {
        self.index = *state.selection_index_range().start();
        self.visibility = MarkerVisibility::Gone;
        self.alpha.set(0.0);
        self.any_checked = state.any_checked();
        self.bubble_touched = false;
        self.index_changed = true;
        self.bubble_offset = self.metrics.default_offset_ratio;
        self.bubble_bounds = Rect::default();
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.bubble_touched = self.visibility == MarkerVisibility::Visible
            && self.alpha() > 0
            && self.bubble_bounds.contains(x, y);
    }

    /// Follows a horizontal drag. Dragging off the bubble releases it.
    ///
    /// Returns `true` when the marker moved or started fading in.
    pub fn pointer_move(
        &mut self,
        x: f64,
        y: f64,
        state: &ChartState,
        transformer: &CoordinateTransformer,
        now_ms: f64,
    ) -> bool {
        if self.bubble_touched && !self.bubble_bounds.contains(x, y) {
            self.bubble_touched = false;
        }
        if self.bubble_touched {
            return false;
        }
        self.update_at(x, y, state, transformer, now_ms)
    }

    /// Ends a gesture. Releasing on the visible bubble dismisses it.
    pub fn pointer_up(
        &mut self,
        x: f64,
        y: f64,
        state: &ChartState,
        transformer: &CoordinateTransformer,
        now_ms: f64,
    ) -> bool {
        if !self.any_checked {
            return false;
        }
        if self.visibility == MarkerVisibility::Visible && self.bubble_touched {
            self.bubble_touched = false;
            self.animate_alpha(false, now_ms);
            self.visibility = MarkerVisibility::Gone;
            debug!(index = self.index, "marker dismissed");
            return true;
        }
        self.update_at(x, y, state, transformer, now_ms)
    }

    fn update_at(
        &mut self,
        x: f64,
        y: f64,
        state: &ChartState,
        transformer: &CoordinateTransformer,
        now_ms: f64,
    ) -> bool {
        if !self.any_checked {
            return false;
        }
        let Some(point) = transformer.surface_to_data(DVec2::new(x, y)) else {
            return false;
        };
        let Some(index) = state.find_nearest_index(point.x) else {
            return false;
        };
        if index == self.index && self.visibility == MarkerVisibility::Visible {
            return false;
        }

        if self.visibility == MarkerVisibility::Gone {
            self.animate_alpha(true, now_ms);
            self.visibility = MarkerVisibility::Visible;
        } else if let Some(bounds) = state.bounds() {
            if self.bubble_bounds.is_horizontally_outside(bounds) {
                self.alpha.set(0.0);
                self.animate_alpha(true, now_ms);
            }
        }

        self.index = index;
        self.index_changed = true;
        trace!(index, "marker moved");
        true
    }

    fn animate_alpha(&mut self, on: bool, now_ms: f64) {
        let target = if on { OPAQUE } else { 0.0 };
        if self.alpha.target() == target {
            return;
        }
        let duration = self
            .animation
            .alpha_duration(target - self.alpha.value());
        self.alpha
            .animate_to(target, now_ms, duration, self.animation.easing);
    }

    /// Fades the marker with the set of checked lines.
    pub fn notify_checked_changed(&mut self, any_checked: bool, now_ms: f64) {
        self.any_checked = any_checked;
        if any_checked {
            if self.alpha.target() == 0.0 && self.visibility == MarkerVisibility::Visible {
                self.animate_alpha(true, now_ms);
            }
        } else if self.visibility == MarkerVisibility::Visible {
            self.animate_alpha(false, now_ms);
        }
    }

    /// Keeps the index inside the selection's index bounds.
    pub fn notify_selection_changed(&mut self, state: &ChartState) {
        let range = state.selection_index_range();
        let clamped = self.index.clamp(*range.start(), *range.end());
        if clamped != self.index {
            self.index = clamped;
            self.index_changed = true;
        }
    }

    pub fn notify_size_changed(&mut self) {
        self.alpha.finish();
    }

    /// Reapplies a persisted snapshot; out-of-range indices are ignored.
    pub fn restore(&mut self, snapshot: MarkerState, state: &ChartState) {
        let Some(series) = state.series() else {
            return;
        };
        if snapshot.index >= series.len() {
            return;
        }
        self.index = snapshot.index;
        self.alpha.set(f64::from(snapshot.alpha));
        self.visibility = snapshot.visibility;
        if snapshot.bubble_offset.is_finite() {
            self.bubble_offset = snapshot.bubble_offset;
        }
        self.any_checked = state.any_checked();
        self.index_changed = false;
        self.notify_selection_changed(state);
    }

    /// Places a bubble of `width` x `height` next to the marker line.
    ///
    /// The offset is re-derived only after the index changed, so the bubble
    /// keeps its side while the selection pans underneath it.
    pub fn layout_bubble(
        &mut self,
        width: f64,
        height: f64,
        state: &ChartState,
        transformer: &CoordinateTransformer,
    ) -> Rect {
        let (Some(series), Some(bounds)) = (state.series(), state.bounds()) else {
            return self.bubble_bounds;
        };
        let Some(x_value) = series.x_values().get(self.index) else {
            return self.bubble_bounds;
        };
        let x = transformer.data_to_surface(DVec2::new(*x_value, 0.0)).x;

        if self.index_changed && width > 0.0 {
            let mut offset_px = self.metrics.default_offset_ratio * width;
            let left = x + offset_px;
            let right = left + width;
            let from_px = bounds.left + self.metrics.horizontal_margin_px;
            let to_px = bounds.right - self.metrics.horizontal_margin_px;
            if left < from_px {
                offset_px += from_px - left;
            } else if right > to_px {
                offset_px -= right - to_px;
            }
            self.bubble_offset = offset_px / width;
            self.index_changed = false;
        }

        let left = x + self.bubble_offset * width;
        self.bubble_bounds = Rect::new(left, bounds.top, left + width, bounds.top + height);
        self.bubble_bounds
    }

    /// Returns `true` while the fade is running.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.alpha.tick(now_ms)
    }

    pub fn jump_to_target(&mut self) {
        self.alpha.finish();
    }

    #[must_use]
    pub fn snapshot(&self) -> MarkerState {
        MarkerState {
            index: self.index,
            bubble_offset: self.bubble_offset,
            alpha: to_alpha(self.alpha.target()),
            visibility: self.visibility,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn visibility(&self) -> MarkerVisibility {
        self.visibility
    }

    /// Current, possibly mid-fade, alpha.
    #[must_use]
    pub fn alpha(&self) -> u8 {
        self.alpha.alpha()
    }

    #[must_use]
    pub fn target_alpha(&self) -> u8 {
        to_alpha(self.alpha.target())
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.alpha.is_animating()
    }

    #[must_use]
    pub fn any_checked(&self) -> bool {
        self.any_checked
    }

    #[must_use]
    pub fn bubble_offset(&self) -> f64 {
        self.bubble_offset
    }

    #[must_use]
    pub fn bubble_bounds(&self) -> Rect {
        self.bubble_bounds
    }

    #[must_use]
    pub fn metrics(&self) -> &BubbleMetrics {
        &self.metrics
    }
}
