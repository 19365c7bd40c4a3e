use proptest::prelude::*;
use sparkline_core::axis::{GRID_LINE_COUNT, compute_step, nice_step};

proptest! {
    #[test]
    fn nice_step_lies_in_window_or_falls_back(
        min_step in 0.0f64..1_000_000.0,
        widen in 0.0f64..1.0
    ) {
        let max_step = min_step * (1.0 + widen) + 0.001;
        let step = nice_step(min_step, max_step);
        prop_assert!(step == max_step || (step >= min_step && step < max_step));
        prop_assert_eq!(step, nice_step(min_step, max_step));
    }

    #[test]
    fn grid_fits_under_the_visible_maximum(
        max_visible in 10.0f64..10_000_000.0,
        height in 100.0f64..2_000.0
    ) {
        let top_padding = 29.0;
        let step = compute_step(max_visible, height, top_padding);
        let top_value = max_visible - top_padding * max_visible / height;
        prop_assert!(step > 0.0);
        prop_assert!(step * GRID_LINE_COUNT as f64 <= top_value + 1e-6 * top_value.abs());
    }
}

#[test]
fn wide_windows_prefer_round_numbers() {
    assert_eq!(nice_step(13625.0, 13862.0), 13800.0);
    assert_eq!(nice_step(36.0, 41.0), 40.0);
}
