use glam::DVec2;
use tracing::trace;

use crate::axis::GRID_LINE_COUNT;
use crate::error::ChartResult;
use crate::interaction::{BubbleContent, BubbleEntry};
use crate::render::{
    DotPrimitive, LinePrimitive, MarkerBubble, RenderFrame, Renderer, ScratchPool, TextHAlign,
    TextPrimitive,
};

use super::ChartEngine;

fn scale_alpha(a: u8, b: u8) -> u8 {
    (u16::from(a) * u16::from(b) / 255) as u8
}

impl<R: Renderer> ChartEngine<R> {
    /// Builds the frame with the engine's own scratch pool.
    pub fn build_frame(&mut self) -> RenderFrame {
        let mut pool = std::mem::take(&mut self.pool);
        let frame = self.build_frame_with_pool(&mut pool);
        self.pool = pool;
        frame
    }

    /// Builds the frame, borrowing point buffers from `pool`.
    ///
    /// Every buffer acquired here is released before returning.
    pub fn build_frame_with_pool(&mut self, pool: &mut ScratchPool) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        if !self.state.is_initialized() || !self.transformer.is_ready() {
            return frame;
        }

        self.push_x_labels(&mut frame);
        let y_labels = self.push_grid(&mut frame, pool);
        self.push_marker_line(&mut frame);
        self.push_series_lines(&mut frame, pool);
        self.push_marker_dots(&mut frame);
        frame.texts.extend(y_labels);
        self.push_bubble(&mut frame);

        trace!(
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            dots = frame.dots.len(),
            "frame built"
        );
        frame
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_frame();
        self.renderer.render(&frame)
    }

    fn push_x_labels(&mut self, frame: &mut RenderFrame) {
        let labels = self
            .x_axis
            .labels(&self.state, &self.transformer, &mut self.formatters.x_axis);
        let baseline = f64::from(self.viewport.height) - self.config.vertical_padding_px;
        for label in labels {
            if label.alpha == 0 {
                continue;
            }
            frame.texts.push(TextPrimitive::new(
                label.text,
                label.x,
                baseline,
                self.config.axis.font_size_px,
                self.theme.axis_label.with_alpha_u8(label.alpha),
                label.h_align,
            ));
        }
    }

    /// Pushes grid rows and the zero line; returns the row labels to draw last.
    fn push_grid(&mut self, frame: &mut RenderFrame, pool: &mut ScratchPool) -> Vec<TextPrimitive> {
        let mut labels = Vec::new();
        let Some(bounds) = self.state.bounds() else {
            return labels;
        };
        let start = self.state.selection_start_value();
        let end = self.state.selection_end_value();
        let axis = self.config.axis;
        let stroke = self.config.stroke.grid_line_width_px;

        let left = self.transformer.data_to_surface(DVec2::new(start, 0.0)).x;
        let right = self.transformer.data_to_surface(DVec2::new(end, 0.0)).x;
        frame.lines.push(LinePrimitive::new(
            left,
            bounds.bottom,
            right,
            bounds.bottom,
            stroke,
            self.theme.grid_line,
        ));
        labels.push(TextPrimitive::new(
            self.formatters.y_axis.format(0.0),
            left,
            bounds.bottom - axis.y_label_bottom_padding_px,
            axis.font_size_px,
            self.theme.axis_label,
            TextHAlign::Left,
        ));

        for grid in self.y_axis.grids() {
            let alpha = grid.alpha();
            if alpha == 0 {
                continue;
            }
            let mut buffer = pool.acquire(2 * GRID_LINE_COUNT);
            for (pair, row) in buffer.chunks_exact_mut(2).zip(grid.rows()) {
                pair[0] = DVec2::new(start, *row);
                pair[1] = DVec2::new(end, *row);
            }
            self.transformer.transform_points(&mut buffer);

            let line_color = self.theme.grid_line.with_alpha_u8(alpha);
            let text_color = self.theme.axis_label.with_alpha_u8(alpha);
            for (pair, row) in buffer.chunks_exact(2).zip(grid.rows()) {
                frame.lines.push(LinePrimitive::new(
                    pair[0].x, pair[0].y, pair[1].x, pair[1].y, stroke, line_color,
                ));
                labels.push(TextPrimitive::new(
                    self.formatters.y_axis.format(*row),
                    pair[0].x,
                    pair[0].y - axis.y_label_bottom_padding_px,
                    axis.font_size_px,
                    text_color,
                    TextHAlign::Left,
                ));
            }
            pool.release(buffer);
        }
        labels
    }

    fn marker_x_value(&self) -> Option<f64> {
        if self.marker.alpha() == 0 {
            return None;
        }
        self.state
            .series()
            .and_then(|series| series.x_values().get(self.marker.index()).copied())
    }

    fn push_marker_line(&self, frame: &mut RenderFrame) {
        let Some(x) = self.marker_x_value() else {
            return;
        };
        let bottom = self.transformer.data_to_surface(DVec2::new(x, 0.0));
        let top = self
            .transformer
            .data_to_surface(DVec2::new(x, self.state.chart_height()));
        frame.lines.push(LinePrimitive::new(
            bottom.x,
            bottom.y,
            top.x,
            top.y,
            self.config.stroke.marker_line_width_px,
            self.theme.marker_line.with_alpha_u8(self.marker.alpha()),
        ));
    }

    /// Draws one index past each edge of the visible range so lines reach the borders.
    fn push_series_lines(&self, frame: &mut RenderFrame, pool: &mut ScratchPool) {
        let Some(series) = self.state.series() else {
            return;
        };
        let xs = series.x_values();
        let visible = self.state.visible_index_range();
        let first = visible.start().saturating_sub(1);
        let last = (visible.end() + 1).min(xs.len() - 1);
        let width = self.config.stroke.line_width_px;

        for (line_index, line) in series.lines().iter().enumerate() {
            let alpha = self.state.line_alpha(line_index);
            if alpha == 0 {
                continue;
            }
            let mut buffer = pool.acquire(last - first + 1);
            for (slot, index) in buffer.iter_mut().zip(first..=last) {
                *slot = DVec2::new(xs[index], line.y_values[index]);
            }
            self.transformer.transform_points(&mut buffer);

            let color = line.color.with_alpha_u8(alpha);
            frame.lines.extend(
                buffer
                    .windows(2)
                    .map(|pair| LinePrimitive::new(pair[0].x, pair[0].y, pair[1].x, pair[1].y, width, color)),
            );
            pool.release(buffer);
        }
    }

    fn push_marker_dots(&self, frame: &mut RenderFrame) {
        let Some(x) = self.marker_x_value() else {
            return;
        };
        let Some(series) = self.state.series() else {
            return;
        };
        let index = self.marker.index();
        let marker_alpha = self.marker.alpha();
        let stroke = self.config.stroke;

        for (line_index, line) in series.lines().iter().enumerate() {
            let line_alpha = self.state.line_alpha(line_index);
            if line_alpha == 0 {
                continue;
            }
            let alpha = scale_alpha(marker_alpha, line_alpha);
            let center = self
                .transformer
                .data_to_surface(DVec2::new(x, line.y_values[index]));
            frame.dots.push(DotPrimitive::new(
                center.x,
                center.y,
                stroke.dot_radius_px,
                stroke.dot_stroke_width_px,
                self.theme.background.with_alpha_u8(alpha),
                line.color.with_alpha_u8(alpha),
            ));
        }
    }

    /// Emits the info bubble while the marker is visible.
    ///
    /// With every line unchecked the marker is fading out and the bubble
    /// keeps only its title until the fade ends.
    fn push_bubble(&mut self, frame: &mut RenderFrame) {
        let Some(x) = self.marker_x_value() else {
            return;
        };
        let (Some(series), Some(bounds)) = (self.state.series(), self.state.bounds()) else {
            return;
        };
        let index = self.marker.index();
        let entries: Vec<BubbleEntry> = series
            .lines()
            .iter()
            .filter(|line| line.checked)
            .map(|line| BubbleEntry {
                label: line.label.clone(),
                value: self.formatters.y_axis.format(line.y_values[index]),
                color: line.color,
            })
            .collect();
        let content = BubbleContent {
            title: self.formatters.bubble_title.format(x),
            entries,
        };

        let metrics = *self.marker.metrics();
        let layout = metrics.layout(&content);
        let rect = self
            .marker
            .layout_bubble(layout.width, layout.height, &self.state, &self.transformer);
        if rect.is_horizontally_outside(bounds) {
            return;
        }

        let alpha = self.marker.alpha();
        let mut texts = Vec::with_capacity(1 + 2 * content.entries.len());
        texts.push(TextPrimitive::new(
            content.title,
            rect.left + layout.title_dx,
            rect.top + layout.title_baseline,
            metrics.title_font_px,
            self.theme.bubble_title.with_alpha_u8(alpha),
            TextHAlign::Left,
        ));
        for (entry, item) in content.entries.into_iter().zip(&layout.items) {
            let color = entry.color.with_alpha_u8(alpha);
            texts.push(TextPrimitive::new(
                entry.value,
                rect.left + item.dx,
                rect.top + item.value_baseline,
                metrics.value_font_px,
                color,
                TextHAlign::Left,
            ));
            if !entry.label.is_empty() {
                texts.push(TextPrimitive::new(
                    entry.label,
                    rect.left + item.dx,
                    rect.top + item.label_baseline,
                    metrics.label_font_px,
                    color,
                    TextHAlign::Left,
                ));
            }
        }

        frame.bubble = Some(MarkerBubble {
            bounds: rect,
            alpha,
            background: self.theme.bubble_background,
            texts,
        });
    }
}
