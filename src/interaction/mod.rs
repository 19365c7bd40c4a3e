mod bubble;
mod marker;

pub use bubble::{
    BUBBLE_COLUMN_COUNT, BubbleContent, BubbleEntry, BubbleItemLayout, BubbleLayout,
    BubbleMetrics,
};
pub use marker::{MarkerLocator, MarkerState, MarkerVisibility};
