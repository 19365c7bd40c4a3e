use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};
use crate::interaction::MarkerState;
use crate::render::Renderer;

use super::ChartEngine;

/// Everything needed to bring a chart back after its host was recreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSessionState {
    pub selection_from: f64,
    pub selection_to: f64,
    pub marker: MarkerState,
    pub chart_height: f64,
    /// Checked flag per line label, in series order.
    #[serde(default)]
    pub checked_lines: IndexMap<String, bool>,
}

impl ChartSessionState {
    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(input: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Captures target values, so a snapshot taken mid-transition restores the end state.
    #[must_use]
    pub fn session_state(&self) -> ChartSessionState {
        let selection = self.state.selection();
        let checked_lines = self
            .state
            .series()
            .map(|series| {
                series
                    .lines()
                    .iter()
                    .map(|line| (line.label.clone(), line.checked))
                    .collect()
            })
            .unwrap_or_default();
        ChartSessionState {
            selection_from: selection.from(),
            selection_to: selection.to(),
            marker: self.marker.snapshot(),
            chart_height: self.state.target_chart_height(),
            checked_lines,
        }
    }

    /// Applies a snapshot without animating. Requires a bound series.
    ///
    /// Unknown line labels are skipped.
    pub fn restore_session(&mut self, session: &ChartSessionState) -> ChartResult<()> {
        if self.state.series().is_none() {
            return Err(ChartError::InvalidData(
                "cannot restore a session before a series is bound".to_owned(),
            ));
        }
        self.jump_to_target_state();
        self.state
            .set_selection(session.selection_from, session.selection_to)?;

        for (label, checked) in &session.checked_lines {
            let position = self
                .state
                .series()
                .and_then(|series| series.lines().iter().position(|line| &line.label == label));
            match position {
                Some(index) => {
                    self.state.set_line_checked(index, *checked)?;
                    self.state.animate_line_alpha(index, 0.0, self.config.animation);
                }
                None => warn!(label = %label, "session references unknown line"),
            }
        }
        self.state.jump_to_target();
        self.state.restore_chart_height(session.chart_height);

        self.transformer.rebuild(&self.state);
        self.y_axis.reset(&self.state);
        self.x_axis.measure(&self.state);
        self.marker.restore(session.marker, &self.state);
        debug!(
            from = session.selection_from,
            to = session.selection_to,
            "session restored"
        );
        Ok(())
    }
}
