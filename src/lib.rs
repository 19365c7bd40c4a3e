//! sparkline-core: headless computational core for zoomable line charts.
//!
//! The crate turns a multi-line time series, a normalized selection window
//! and a surface size into draw-ready primitives. It answers range-maximum
//! queries for auto-scaling, picks nice y-grid steps, clusters x labels so
//! they never overlap while zooming, and resolves pointer positions to the
//! nearest sample. Time is supplied by the host on every call.

pub mod animation;
pub mod api;
pub mod axis;
pub mod core;
pub mod error;
pub mod format;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, ChartSessionState, ChartTheme};
pub use error::{ChartError, ChartResult};
