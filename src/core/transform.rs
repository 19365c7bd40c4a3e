use std::cell::Cell;
use std::ops::Range;

use glam::{DAffine2, DVec2};
use tracing::trace;

use crate::core::ChartState;

/// Affine mapping between data space and surface pixels.
///
/// The forward matrix is rebuilt eagerly from [`ChartState`]; the inverse is
/// computed on first use after the forward matrix changes.
#[derive(Debug, Clone, Default)]
pub struct CoordinateTransformer {
    forward: DAffine2,
    ready: bool,
    inverse: Cell<Option<DAffine2>>,
    inverse_builds: Cell<u64>,
}

impl CoordinateTransformer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the forward matrix; returns `false` while the state is not initialized.
    ///
    /// Data x is shifted by the selection start and scaled so the selection
    /// spans the content width. Data y is scaled so the current chart height
    /// spans the bounds height, flipped so larger values sit higher, and the
    /// result is offset by the horizontal padding and the bounds origin.
    pub fn rebuild(&mut self, state: &ChartState) -> bool {
        let Some(bounds) = state.bounds() else {
            self.invalidate();
            return false;
        };
        if state.series().is_none() || state.selection_width() <= 0.0 {
            self.invalidate();
            return false;
        }

        let height = bounds.height();
        let chart_height = state.chart_height();
        let chart_height = if chart_height.is_finite() && chart_height > 0.0 {
            chart_height
        } else {
            1.0
        };

        let shift = DAffine2::from_translation(DVec2::new(-state.selection_start_value(), 0.0));
        let scale = DAffine2::from_scale(DVec2::new(
            state.content_width() / state.selection_width(),
            height / chart_height,
        ));
        let flip = DAffine2::from_translation(DVec2::new(0.0, height / 2.0))
            * DAffine2::from_scale(DVec2::new(1.0, -1.0))
            * DAffine2::from_translation(DVec2::new(0.0, -height / 2.0));
        let offset = DAffine2::from_translation(DVec2::new(
            bounds.left + state.horizontal_padding_px(),
            bounds.top,
        ));

        let forward = offset * flip * scale * shift;
        if !self.ready || forward != self.forward {
            self.inverse.set(None);
            self.forward = forward;
            trace!(chart_height, "transform rebuilt");
        }
        self.ready = true;
        true
    }

    fn invalidate(&mut self) {
        self.ready = false;
        self.inverse.set(None);
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[must_use]
    pub fn forward(&self) -> DAffine2 {
        self.forward
    }

    #[must_use]
    pub fn data_to_surface(&self, point: DVec2) -> DVec2 {
        self.forward.transform_point2(point)
    }

    /// Maps `points` in place.
    pub fn transform_points(&self, points: &mut [DVec2]) {
        for point in points {
            *point = self.forward.transform_point2(*point);
        }
    }

    /// Maps `source[range]` into the front of `target`.
    ///
    /// Copies at most `target.len()` points; returns how many were written.
    pub fn transform_range(&self, source: &[DVec2], range: Range<usize>, target: &mut [DVec2]) -> usize {
        let end = range.end.min(source.len());
        let start = range.start.min(end);
        let mut written = 0;
        for (slot, point) in target.iter_mut().zip(&source[start..end]) {
            *slot = self.forward.transform_point2(*point);
            written += 1;
        }
        written
    }

    /// Maps a surface point back to data space; `None` when the matrix is singular.
    #[must_use]
    pub fn surface_to_data(&self, point: DVec2) -> Option<DVec2> {
        self.inverse_matrix().map(|inverse| inverse.transform_point2(point))
    }

    /// How many times the inverse has been materialized since construction.
    #[must_use]
    pub fn inverse_builds(&self) -> u64 {
        self.inverse_builds.get()
    }

    fn inverse_matrix(&self) -> Option<DAffine2> {
        if let Some(inverse) = self.inverse.get() {
            return Some(inverse);
        }
        let determinant = self.forward.matrix2.determinant();
        if !determinant.is_finite() || determinant.abs() <= f64::EPSILON * f64::EPSILON {
            return None;
        }
        let inverse = self.forward.inverse();
        self.inverse.set(Some(inverse));
        self.inverse_builds.set(self.inverse_builds.get() + 1);
        Some(inverse)
    }
}
