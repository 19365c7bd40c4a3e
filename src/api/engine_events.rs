use tracing::{debug, trace, warn};

use crate::core::{Series, Viewport};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Binds a new series; every planner restarts from its resting state.
    pub fn bind_series(&mut self, series: Series) -> ChartResult<()> {
        self.jump_to_target_state();
        self.state.bind_series(series)?;
        self.transformer.rebuild(&self.state);
        self.y_axis.reset(&self.state);
        self.x_axis.measure(&self.state);
        self.marker.reset(&self.state);
        self.formatters.x_axis.clear();
        self.formatters.bubble_title.clear();
        debug!(generation = self.state.generation(), "series bound to engine");
        Ok(())
    }

    /// Moves the visible window and starts the resulting transitions.
    pub fn set_selection(&mut self, from: f64, to: f64, now_ms: f64) -> ChartResult<()> {
        if let Err(err) = self.state.set_selection(from, to) {
            warn!(error = %err, "rejected selection");
            return Err(err);
        }
        let animation = self.config.animation;
        self.state.animate_chart_height(now_ms, animation);
        self.transformer.rebuild(&self.state);
        self.y_axis.animate_changes(&self.state, now_ms);
        self.x_axis
            .animate_changes(self.state.selection_width(), now_ms);
        self.marker.notify_selection_changed(&self.state);
        trace!(from, to, "selection applied");
        Ok(())
    }

    /// Applies a new surface size. In-flight transitions complete immediately.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        let bounds = self.config.chart_bounds(viewport)?;
        if let Err(err) = self.state.set_viewport_bounds(bounds) {
            warn!(error = %err, "rejected resize");
            return Err(err);
        }
        self.viewport = viewport;
        self.config.viewport = viewport;
        self.jump_to_target_state();
        self.y_axis.reset(&self.state);
        self.x_axis.measure(&self.state);
        self.marker.notify_size_changed();
        debug!(width = viewport.width, height = viewport.height, "viewport resized");
        Ok(())
    }

    pub fn set_horizontal_padding(&mut self, padding_px: f64) -> ChartResult<()> {
        self.state.set_horizontal_padding(padding_px)?;
        self.config.horizontal_padding_px = padding_px;
        self.transformer.rebuild(&self.state);
        self.y_axis.reset(&self.state);
        self.x_axis.measure(&self.state);
        Ok(())
    }

    /// Checks or unchecks one line, fading it and rescaling toward the new maximum.
    pub fn set_line_checked(&mut self, index: usize, checked: bool, now_ms: f64) -> ChartResult<()> {
        if !self.state.set_line_checked(index, checked)? {
            return Ok(());
        }
        let animation = self.config.animation;
        self.state.animate_line_alpha(index, now_ms, animation);
        self.state.animate_chart_height(now_ms, animation);
        self.transformer.rebuild(&self.state);
        self.y_axis.animate_changes(&self.state, now_ms);
        self.marker
            .notify_checked_changed(self.state.any_checked(), now_ms);
        Ok(())
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.marker.pointer_down(x, y);
    }

    /// Horizontal drag; hosts route vertical drags to their own scrolling.
    pub fn pointer_move(&mut self, x: f64, y: f64, now_ms: f64) -> bool {
        self.marker
            .pointer_move(x, y, &self.state, &self.transformer, now_ms)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, now_ms: f64) -> bool {
        self.marker
            .pointer_up(x, y, &self.state, &self.transformer, now_ms)
    }

    /// Advances every transition to `now_ms`; returns `true` while any is running.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let mut running = self.state.tick(now_ms);
        self.transformer.rebuild(&self.state);
        running |= self.y_axis.tick(now_ms);
        running |= self.x_axis.tick(now_ms, self.state.selection_width());
        running |= self.marker.tick(now_ms);
        running
    }

    /// Completes every in-flight transition at its target.
    pub fn jump_to_target_state(&mut self) {
        self.state.jump_to_target();
        self.y_axis.jump_to_target();
        self.x_axis.jump_to_target();
        self.marker.jump_to_target();
        self.transformer.rebuild(&self.state);
    }
}
