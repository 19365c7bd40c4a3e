//! Range-maximum queries over the checked lines of a series.
//!
//! `LinearScan` walks the inclusive range on every call. `SparseTable`
//! precomputes per-line argmax tables at bind time and answers each query
//! with two lookups per line.

#[cfg(feature = "parallel-build")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::Series;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RmqStrategy {
    LinearScan,
    #[default]
    SparseTable,
}

/// Argmax table: `levels[k][i]` is the index of the maximum in `[i, i + 2^k)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SparseTable {
    levels: Vec<Vec<usize>>,
}

impl SparseTable {
    #[must_use]
    pub fn build(values: &[f64]) -> Self {
        let len = values.len();
        if len == 0 {
            return Self::default();
        }

        let depth = len.ilog2() as usize + 1;
        let mut levels = Vec::with_capacity(depth);
        levels.push((0..len).collect::<Vec<_>>());
        for level in 1..depth {
            let half = 1usize << (level - 1);
            let previous = &levels[level - 1];
            let row = (0..=len - (1usize << level))
                .map(|i| {
                    let left = previous[i];
                    let right = previous[i + half];
                    if values[right] > values[left] { right } else { left }
                })
                .collect::<Vec<_>>();
            levels.push(row);
        }
        Self { levels }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the maximum of `values[first..=last]`; `first <= last < len`.
    #[must_use]
    pub fn argmax(&self, values: &[f64], first: usize, last: usize) -> usize {
        let span = last - first + 1;
        let level = span.ilog2() as usize;
        let row = &self.levels[level];
        let left = row[first];
        let right = row[last + 1 - (1usize << level)];
        if values[right] > values[left] { right } else { left }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RangeMaxQuery {
    LinearScan,
    SparseTable(Vec<SparseTable>),
}

impl RangeMaxQuery {
    #[must_use]
    pub fn new(strategy: RmqStrategy) -> Self {
        match strategy {
            RmqStrategy::LinearScan => Self::LinearScan,
            RmqStrategy::SparseTable => Self::SparseTable(Vec::new()),
        }
    }

    #[must_use]
    pub fn strategy(&self) -> RmqStrategy {
        match self {
            Self::LinearScan => RmqStrategy::LinearScan,
            Self::SparseTable(_) => RmqStrategy::SparseTable,
        }
    }

    /// Precomputes whatever the strategy needs for `series`.
    pub fn build(&mut self, series: &Series) {
        let Self::SparseTable(tables) = self else {
            return;
        };

        #[cfg(feature = "parallel-build")]
        {
            *tables = series
                .lines()
                .par_iter()
                .map(|line| SparseTable::build(&line.y_values))
                .collect();
        }
        #[cfg(not(feature = "parallel-build"))]
        {
            *tables = series
                .lines()
                .iter()
                .map(|line| SparseTable::build(&line.y_values))
                .collect();
        }

        debug!(
            lines = tables.len(),
            points = series.len(),
            "built sparse tables"
        );
    }

    /// Maximum y over checked lines in `[first, last]` (clamped to the series).
    ///
    /// Returns `0.0` when no line is checked or the range is empty.
    #[must_use]
    pub fn query_max(&self, series: &Series, first: usize, last: usize) -> f64 {
        if series.is_empty() {
            return 0.0;
        }
        let last = last.min(series.len() - 1);
        if first > last {
            return 0.0;
        }

        let tables = match self {
            Self::SparseTable(tables) if tables.len() == series.line_count() => Some(tables),
            Self::SparseTable(_) => {
                warn!("sparse tables out of date with bound series; using linear scan");
                None
            }
            Self::LinearScan => None,
        };

        let mut best: Option<f64> = None;
        for (line_index, line) in series.lines().iter().enumerate() {
            if !line.checked {
                continue;
            }
            let values = &line.y_values;
            let line_max = match tables.map(|tables| &tables[line_index]) {
                Some(table) if table.len() == values.len() => {
                    values[table.argmax(values, first, last)]
                }
                _ => values[first..=last]
                    .iter()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max),
            };
            best = Some(best.map_or(line_max, |current| current.max(line_max)));
        }
        best.unwrap_or(0.0)
    }
}
