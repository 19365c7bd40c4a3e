mod engine;
mod engine_config;
mod engine_events;
mod frame_builder;
mod session;
mod theme;

pub use engine::ChartEngine;
pub use engine_config::{AxisConfig, ChartEngineConfig, StrokeConfig};
pub use session::ChartSessionState;
pub use theme::ChartTheme;
