use tracing::debug;

use crate::axis::{XAxisClusterPlanner, YAxisStepPlanner};
use crate::core::{ChartState, CoordinateTransformer, Viewport};
use crate::error::ChartResult;
use crate::format::{ChartFormatters, ValueFormatterFn};
use crate::interaction::{MarkerLocator, MarkerState};
use crate::render::{Renderer, ScratchPool};

use super::{ChartEngineConfig, ChartTheme};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the chart state and every planner derived from it.
/// Hosts feed it series, selection, size and pointer events, advance it
/// with `tick`, and pull a `RenderFrame` for each draw.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartEngineConfig,
    pub(super) theme: ChartTheme,
    pub(super) viewport: Viewport,
    pub(super) state: ChartState,
    pub(super) transformer: CoordinateTransformer,
    pub(super) y_axis: YAxisStepPlanner,
    pub(super) x_axis: XAxisClusterPlanner,
    pub(super) marker: MarkerLocator,
    pub(super) formatters: ChartFormatters,
    pub(super) pool: ScratchPool,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let mut state = ChartState::new(config.rmq_strategy);
        state.set_viewport_bounds(config.chart_bounds(config.viewport)?)?;
        state.set_horizontal_padding(config.horizontal_padding_px)?;

        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            strategy = ?config.rmq_strategy,
            "chart engine created"
        );

        Ok(Self {
            renderer,
            theme: ChartTheme::default(),
            viewport: config.viewport,
            state,
            transformer: CoordinateTransformer::new(),
            y_axis: YAxisStepPlanner::new(config.axis.y_top_padding_px, config.animation),
            x_axis: XAxisClusterPlanner::new(config.axis.x_axis_metrics(), config.animation),
            marker: MarkerLocator::new(config.bubble, config.animation),
            formatters: ChartFormatters::default(),
            pool: ScratchPool::new(),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn state(&self) -> &ChartState {
        &self.state
    }

    #[must_use]
    pub fn transformer(&self) -> &CoordinateTransformer {
        &self.transformer
    }

    #[must_use]
    pub fn y_axis(&self) -> &YAxisStepPlanner {
        &self.y_axis
    }

    #[must_use]
    pub fn x_axis(&self) -> &XAxisClusterPlanner {
        &self.x_axis
    }

    #[must_use]
    pub fn marker(&self) -> &MarkerLocator {
        &self.marker
    }

    #[must_use]
    pub fn marker_state(&self) -> MarkerState {
        self.marker.snapshot()
    }

    #[must_use]
    pub fn theme(&self) -> ChartTheme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: ChartTheme) -> ChartResult<()> {
        self.theme = theme.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn formatters(&self) -> &ChartFormatters {
        &self.formatters
    }

    pub fn set_x_axis_formatter(&mut self, formatter: ValueFormatterFn) {
        self.formatters.x_axis.set_formatter(formatter);
    }

    pub fn set_y_axis_formatter(&mut self, formatter: ValueFormatterFn) {
        self.formatters.y_axis.set_formatter(formatter);
    }

    pub fn set_bubble_title_formatter(&mut self, formatter: ValueFormatterFn) {
        self.formatters.bubble_title.set_formatter(formatter);
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
