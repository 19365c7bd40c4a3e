//! Label formatters and their LRU cache.

use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use indexmap::IndexMap;
use ordered_float::OrderedFloat;

pub type ValueFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatterCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Wraps a formatter with a small least-recently-used cache keyed by value.
#[derive(Clone)]
pub struct CachingFormatter {
    formatter: ValueFormatterFn,
    entries: IndexMap<OrderedFloat<f64>, String>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl fmt::Debug for CachingFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingFormatter")
            .field("capacity", &self.capacity)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl CachingFormatter {
    pub const DEFAULT_CAPACITY: usize = 30;

    #[must_use]
    pub fn new(formatter: ValueFormatterFn) -> Self {
        Self::with_capacity(formatter, Self::DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(formatter: ValueFormatterFn, capacity: usize) -> Self {
        Self {
            formatter,
            entries: IndexMap::with_capacity(capacity),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    pub fn format(&mut self, value: f64) -> String {
        let key = OrderedFloat(value);
        if let Some(label) = self.entries.shift_remove(&key) {
            self.hits = self.hits.saturating_add(1);
            self.entries.insert(key, label.clone());
            return label;
        }

        self.misses = self.misses.saturating_add(1);
        let label = (self.formatter)(value);
        if self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(key, label.clone());
        label
    }

    /// Swaps the underlying formatter and drops cached labels.
    pub fn set_formatter(&mut self, formatter: ValueFormatterFn) {
        self.formatter = formatter;
        self.entries.clear();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn stats(&self) -> FormatterCacheStats {
        FormatterCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}

/// Formatters for every label the chart draws.
#[derive(Debug, Clone)]
pub struct ChartFormatters {
    pub x_axis: CachingFormatter,
    pub y_axis: CachingFormatter,
    pub bubble_title: CachingFormatter,
}

impl Default for ChartFormatters {
    fn default() -> Self {
        Self {
            x_axis: CachingFormatter::new(date_formatter("%b %-d")),
            y_axis: CachingFormatter::new(number_formatter()),
            bubble_title: CachingFormatter::new(date_formatter("%a, %b %-d")),
        }
    }
}

/// At most two fraction digits, thousands separated by spaces.
#[must_use]
pub fn number_formatter() -> ValueFormatterFn {
    Arc::new(format_grouped)
}

/// Formats unix seconds with a `chrono` strftime pattern, in UTC.
///
/// Values outside chrono's range fall back to the number formatter.
#[must_use]
pub fn date_formatter(pattern: &'static str) -> ValueFormatterFn {
    Arc::new(move |seconds| {
        if !seconds.is_finite() {
            return format_grouped(seconds);
        }
        match DateTime::from_timestamp(seconds.floor() as i64, 0) {
            Some(time) => time.format(pattern).to_string(),
            None => format_grouped(seconds),
        }
    })
}

#[must_use]
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let cents = (value.abs() * 100.0).round();
    let negative = value < 0.0 && cents > 0.0;
    let whole = (cents / 100.0).trunc() as u64;
    let fraction = (cents % 100.0) as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if negative {
        grouped.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    if fraction > 0 {
        let fraction = format!("{fraction:02}");
        grouped.push('.');
        grouped.push_str(fraction.trim_end_matches('0'));
    }
    grouped
}
