//! X-axis label clustering.
//!
//! At measure time the label stride for the full selection is found, then
//! halved repeatedly. Each stride becomes a cluster together with the
//! narrowest selection width (in data units) at which its extra labels fit
//! between the ones already shown. Zooming in turns on finer clusters, and
//! labels of coarser clusters never move.

use glam::DVec2;
use tracing::{debug, trace};

use crate::animation::{AnimatedValue, AnimationConfig, OPAQUE, to_alpha};
use crate::core::{ChartState, CoordinateTransformer};
use crate::format::CachingFormatter;
use crate::render::TextHAlign;

/// Fixed label geometry used when measuring clusters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XAxisMetrics {
    pub label_width_px: f64,
    pub label_spacing_px: f64,
}

/// One label stride and the selection width it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    step: f64,
    min_chart_width: f64,
    alpha: u8,
    fade: AnimatedValue,
    fading_out: bool,
}

impl Cluster {
    fn new(step: f64, min_chart_width: f64, alpha: u8) -> Self {
        Self {
            step,
            min_chart_width,
            alpha,
            fade: AnimatedValue::new(f64::from(alpha)),
            fading_out: false,
        }
    }

    /// Index stride between labels; `>= 1`.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Selection width at or above which this cluster is shown.
    #[must_use]
    pub fn min_chart_width(&self) -> f64 {
        self.min_chart_width
    }

    #[must_use]
    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    #[must_use]
    pub fn target_alpha(&self) -> u8 {
        to_alpha(self.fade.target())
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.fade.is_animating()
    }
}

/// A label ready to be drawn on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct XAxisLabel {
    pub index: usize,
    pub text: String,
    pub x: f64,
    pub h_align: TextHAlign,
    pub alpha: u8,
}

/// Rounds half up; negative inputs clamp to zero.
fn round_index(value: f64) -> usize {
    (value + 0.5).floor().max(0.0) as usize
}

#[derive(Debug, Clone)]
pub struct XAxisClusterPlanner {
    metrics: XAxisMetrics,
    animation: AnimationConfig,
    clusters: Vec<Cluster>,
    current_index: usize,
    label_chart_width: f64,
    extra_chart_spacing: f64,
    x_range: f64,
    drawn: Vec<bool>,
}

impl XAxisClusterPlanner {
    #[must_use]
    pub fn new(metrics: XAxisMetrics, animation: AnimationConfig) -> Self {
        Self {
            metrics,
            animation,
            clusters: Vec::new(),
            current_index: 0,
            label_chart_width: 0.0,
            extra_chart_spacing: 0.0,
            x_range: 0.0,
            drawn: Vec::new(),
        }
    }

    /// Rebuilds the cluster list for the bound series and content width.
    ///
    /// Leaves the planner empty when the state is not initialized or has no
    /// drawable width.
    pub fn measure(&mut self, state: &ChartState) {
        self.clusters.clear();
        self.current_index = 0;
        let Some(series) = state.series() else {
            return;
        };
        let content_width = state.content_width();
        if !state.is_initialized() || content_width <= 0.0 {
            return;
        }

        let xs = series.x_values();
        let count = xs.len();
        let last = count - 1;
        self.x_range = series.x_range();

        let label_width = self.metrics.label_width_px;
        let spacing = self.metrics.label_spacing_px;
        let x_factor = self.x_range / content_width;
        self.label_chart_width = x_factor * label_width;
        self.extra_chart_spacing = x_factor * spacing;

        // Largest label count whose first gap still fits a left-aligned label,
        // half a centered one and the spacing.
        let min_first_gap = self.label_chart_width * 1.5 + self.extra_chart_spacing;
        let mut label_count = 2usize;
        while label_count < count {
            let step = last as f64 / label_count as f64;
            let first_gap = xs[round_index(step).min(last)] - xs[0];
            if first_gap < min_first_gap {
                break;
            }
            label_count += 1;
        }
        let mut step = last as f64 / (label_count - 1) as f64;

        let selection_width = state.selection_width();
        let mut found = false;
        let mut left = 0usize;
        let mut right = round_index(step).min(last);
        while step >= 1.0 {
            let next_step = if step > 1.0 { (step / 2.0).max(1.0) } else { 0.0 };
            let min_chart_width = if step > 1.0 {
                let middle = (left + round_index(next_step)).min(last);
                let left_to_middle = if left == 0 { label_width } else { label_width / 2.0 }
                    + spacing
                    + label_width / 2.0;
                let middle_to_right = label_width + spacing;
                let width = (content_width * (xs[middle] - xs[left]) / left_to_middle)
                    .min(content_width * (xs[right] - xs[middle]) / middle_to_right);

                right = middle;
                if right <= left + 1 && next_step > 1.0 {
                    // No room left between this pair; advance to the next window.
                    let mut multiple = 2.0;
                    while right <= left + 1 && left < last {
                        left = right;
                        right = round_index(next_step * multiple).min(last);
                        multiple += 1.0;
                    }
                }
                width
            } else {
                0.0
            };

            let narrower = self
                .clusters
                .last()
                .is_none_or(|previous| previous.min_chart_width > min_chart_width);
            if narrower {
                let alpha = if found { 0 } else { u8::MAX };
                self.clusters.push(Cluster::new(step, min_chart_width, alpha));
                if !found && selection_width >= min_chart_width {
                    self.current_index = self.clusters.len() - 1;
                    found = true;
                }
            }
            step = next_step;
        }

        debug!(
            clusters = self.clusters.len(),
            current = self.current_index,
            "x axis measured"
        );
    }

    /// First cluster whose minimum width fits `selection_width`.
    #[must_use]
    pub fn find_cluster_index(&self, selection_width: f64) -> Option<usize> {
        self.clusters
            .iter()
            .position(|cluster| selection_width >= cluster.min_chart_width)
    }

    /// Fades clusters in or out after the selection width changed.
    ///
    /// Returns `true` when the current cluster moved.
    pub fn animate_changes(&mut self, selection_width: f64, now_ms: f64) -> bool {
        if self.clusters.is_empty() {
            return false;
        }
        let target = self
            .find_cluster_index(selection_width)
            .unwrap_or(self.clusters.len() - 1);
        if target == self.current_index {
            return false;
        }

        if target < self.current_index {
            for index in target + 1..=self.current_index {
                self.animate_cluster(index, false, now_ms);
            }
        } else {
            for index in self.current_index + 1..=target {
                self.animate_cluster(index, true, now_ms);
            }
        }
        trace!(from = self.current_index, to = target, "x cluster changed");
        self.current_index = target;
        true
    }

    fn animate_cluster(&mut self, index: usize, on: bool, now_ms: f64) {
        let animation = self.animation;
        let cluster = &mut self.clusters[index];
        let target = if on { OPAQUE } else { 0.0 };
        if cluster.fade.target() == target {
            return;
        }
        let alpha = f64::from(cluster.alpha);
        cluster.fade.set(alpha);
        cluster.fade.animate_to(
            target,
            now_ms,
            animation.alpha_duration(target - alpha),
            animation.easing,
        );
        if !cluster.fade.is_animating() {
            cluster.alpha = to_alpha(target);
        }
        cluster.fading_out = !on;
    }

    /// Advances cluster fades; returns `true` while any is running.
    ///
    /// A cluster fading out is additionally dimmed by how far the selection
    /// has grown past its parent's threshold, and stops once that reaches zero.
    pub fn tick(&mut self, now_ms: f64, selection_width: f64) -> bool {
        let mut running = false;
        for index in 0..self.clusters.len() {
            let dampening_span = if index >= 1 {
                let min_width = self.clusters[index - 1].min_chart_width;
                let max_width = if index >= 2 {
                    self.clusters[index - 2].min_chart_width
                } else {
                    self.x_range
                };
                Some((min_width, max_width))
            } else {
                None
            };

            let cluster = &mut self.clusters[index];
            if !cluster.fade.is_animating() {
                continue;
            }
            let still_running = cluster.fade.tick(now_ms);
            let mut alpha = cluster.fade.value();
            if cluster.fading_out {
                if let Some((min_width, max_width)) = dampening_span {
                    let span = max_width - min_width;
                    if span > 0.0 {
                        alpha *= ((max_width - selection_width).max(0.0) / span).min(1.0);
                    }
                }
            }
            cluster.alpha = to_alpha(alpha);
            if cluster.fading_out && cluster.alpha == 0 {
                cluster.fade.set(0.0);
                continue;
            }
            running |= still_running;
        }
        running
    }

    pub fn jump_to_target(&mut self) {
        for cluster in &mut self.clusters {
            cluster.fade.finish();
            cluster.alpha = cluster.fade.alpha();
            cluster.fading_out = false;
        }
    }

    /// Deepest cluster that still contributes labels.
    ///
    /// Covers the current cluster and any finer cluster still fading out.
    #[must_use]
    pub fn deepest_visible_index(&self) -> usize {
        self.clusters
            .iter()
            .rposition(|cluster| cluster.alpha > 0 || cluster.fade.is_animating())
            .map_or(self.current_index, |index| index.max(self.current_index))
    }

    /// Emits labels from the coarsest cluster down to the deepest visible one.
    ///
    /// Each sample index is emitted at most once; indices already taken by a
    /// coarser cluster keep that cluster's alpha.
    pub fn labels(
        &mut self,
        state: &ChartState,
        transformer: &CoordinateTransformer,
        formatter: &mut CachingFormatter,
    ) -> Vec<XAxisLabel> {
        let mut labels = Vec::new();
        if self.clusters.is_empty() || !transformer.is_ready() {
            return labels;
        }
        let Some(series) = state.series() else {
            return labels;
        };
        let xs = series.x_values();
        let count = xs.len();
        self.drawn.clear();
        self.drawn.resize(count, false);

        let visible = state.visible_index_range();
        let half_label = (self.label_chart_width + self.extra_chart_spacing) / 2.0;
        let from = xs[*visible.start()] - half_label;
        let to = xs[*visible.end()] + half_label;

        let deepest = self.deepest_visible_index().min(self.clusters.len() - 1);
        for cluster in &self.clusters[..=deepest] {
            let mut multiple = 0usize;
            let mut index = 0usize;
            while index < count && (xs[index] <= to || index == count - 1) {
                if !self.drawn[index] {
                    if xs[index] >= from || index == 0 {
                        let x = transformer.data_to_surface(DVec2::new(xs[index], 0.0)).x;
                        let h_align = if index == 0 {
                            TextHAlign::Left
                        } else if index == count - 1 {
                            TextHAlign::Right
                        } else {
                            TextHAlign::Center
                        };
                        labels.push(XAxisLabel {
                            index,
                            text: formatter.format(xs[index]),
                            x,
                            h_align,
                            alpha: cluster.alpha,
                        });
                    }
                    self.drawn[index] = true;
                }
                multiple += 1;
                let next = round_index(cluster.step * multiple as f64);
                if next <= index {
                    break;
                }
                index = next;
            }
        }
        labels
    }

    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Label width converted to data units at full selection.
    #[must_use]
    pub fn label_chart_width(&self) -> f64 {
        self.label_chart_width
    }
}
