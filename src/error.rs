use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid selection: from={from}, to={to} (expected 0 <= from < to <= 1)")]
    InvalidSelection { from: f64, to: f64 },

    #[error("malformed series: {0}")]
    MalformedSeries(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("session state serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
