pub mod chart_state;
pub mod rmq;
pub mod search;
pub mod series;
pub mod transform;
pub mod types;

pub use chart_state::ChartState;
pub use rmq::{RangeMaxQuery, RmqStrategy, SparseTable};
pub use search::{Rounding, search_sorted, search_sorted_in};
pub use series::{Line, Series};
pub use transform::CoordinateTransformer;
pub use types::{Rect, SelectionWindow, Viewport};
