use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::animation::{AnimatedValue, AnimationConfig, OPAQUE};
use crate::axis::nice_step;
use crate::core::ChartState;

/// Horizontal grid rows drawn above the zero line.
pub const GRID_LINE_COUNT: usize = 5;

/// Extra fractional rows allowed when searching for the smallest step.
const MIN_STEP_SLACK: f64 = 0.6;

/// One set of evenly spaced rows at `(i + 1) * step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    step: f64,
    rows: [f64; GRID_LINE_COUNT],
    alpha: AnimatedValue,
}

impl Grid {
    fn new(step: f64, alpha: f64) -> Self {
        let mut rows = [0.0; GRID_LINE_COUNT];
        for (i, row) in rows.iter_mut().enumerate() {
            *row = (i + 1) as f64 * step;
        }
        Self {
            step,
            rows,
            alpha: AnimatedValue::new(alpha),
        }
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Row values in data space, bottom to top.
    #[must_use]
    pub fn rows(&self) -> &[f64; GRID_LINE_COUNT] {
        &self.rows
    }

    #[must_use]
    pub fn alpha(&self) -> u8 {
        self.alpha.alpha()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.alpha.is_animating()
    }
}

/// Smallest nice step that fits `GRID_LINE_COUNT` rows under the top label padding.
#[must_use]
pub fn compute_step(max_visible_entry: f64, window_height: f64, top_padding_px: f64) -> f64 {
    if window_height <= 0.0 {
        return max_visible_entry / GRID_LINE_COUNT as f64;
    }
    let y_factor = max_visible_entry / window_height;
    let top_value = max_visible_entry - top_padding_px * y_factor;
    let max_step = top_value / GRID_LINE_COUNT as f64;
    let min_step = top_value / (GRID_LINE_COUNT as f64 + MIN_STEP_SLACK);
    nice_step(min_step, max_step)
}

/// Owns the current y grid and the grids still fading out behind it.
#[derive(Debug, Clone)]
pub struct YAxisStepPlanner {
    current: Option<Grid>,
    disappearing: SmallVec<[Grid; 4]>,
    max_visible_entry: f64,
    step: f64,
    top_padding_px: f64,
    animation: AnimationConfig,
}

impl YAxisStepPlanner {
    #[must_use]
    pub fn new(top_padding_px: f64, animation: AnimationConfig) -> Self {
        Self {
            current: None,
            disappearing: SmallVec::new(),
            max_visible_entry: 0.0,
            step: 0.0,
            top_padding_px,
            animation,
        }
    }

    /// Drops every grid and installs a fully opaque one for the current state.
    pub fn reset(&mut self, state: &ChartState) {
        self.current = None;
        self.disappearing.clear();
        self.max_visible_entry = 0.0;
        self.step = 0.0;
        if !state.is_initialized() {
            return;
        }
        self.max_visible_entry = state.max_visible_entry();
        self.step = compute_step(
            self.max_visible_entry,
            state.window_height(),
            self.top_padding_px,
        );
        self.current = Some(Grid::new(self.step, OPAQUE));
        debug!(step = self.step, "y grid reset");
    }

    /// Cross-fades to a new grid when the max visible entry moved the step.
    ///
    /// Returns `true` when a new grid was started.
    pub fn animate_changes(&mut self, state: &ChartState, now_ms: f64) -> bool {
        if !state.is_initialized() {
            return false;
        }
        let max_visible_entry = state.max_visible_entry();
        if max_visible_entry == self.max_visible_entry {
            return false;
        }
        self.max_visible_entry = max_visible_entry;

        let step = compute_step(
            max_visible_entry,
            state.window_height(),
            self.top_padding_px,
        );
        if step == self.step {
            return false;
        }
        self.step = step;

        if let Some(mut grid) = self.current.take() {
            let alpha = grid.alpha.value();
            grid.alpha.animate_to(
                0.0,
                now_ms,
                self.animation.alpha_duration(alpha),
                self.animation.easing,
            );
            if grid.alpha.is_animating() {
                self.disappearing.push(grid);
            }
        }

        let mut grid = Grid::new(step, 0.0);
        grid.alpha.animate_to(
            OPAQUE,
            now_ms,
            self.animation.duration_ms,
            self.animation.easing,
        );
        self.current = Some(grid);
        trace!(step, fading = self.disappearing.len(), "y grid replaced");
        true
    }

    /// Advances every fade; returns `true` while any grid is still animating.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let mut running = false;
        if let Some(grid) = &mut self.current {
            running |= grid.alpha.tick(now_ms);
        }
        for grid in &mut self.disappearing {
            running |= grid.alpha.tick(now_ms);
        }
        self.disappearing
            .retain(|grid| grid.alpha.is_animating() || grid.alpha() > 0);
        running
    }

    pub fn jump_to_target(&mut self) {
        if let Some(grid) = &mut self.current {
            grid.alpha.finish();
        }
        self.disappearing.clear();
    }

    #[must_use]
    pub fn current_grid(&self) -> Option<&Grid> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn disappearing_grids(&self) -> &[Grid] {
        &self.disappearing
    }

    /// Current grid first, then the fading ones.
    pub fn grids(&self) -> impl Iterator<Item = &Grid> {
        self.current.iter().chain(self.disappearing.iter())
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }
}
