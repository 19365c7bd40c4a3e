mod nice_step;
pub mod x_axis;
pub mod y_axis;

pub use nice_step::nice_step;
pub use x_axis::{Cluster, XAxisClusterPlanner, XAxisLabel, XAxisMetrics};
pub use y_axis::{GRID_LINE_COUNT, Grid, YAxisStepPlanner, compute_step};
