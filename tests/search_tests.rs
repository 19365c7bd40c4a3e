use sparkline_core::core::{Rounding, search_sorted};

#[test]
fn out_of_range_targets_clamp_to_the_ends() {
    let values = [10.0, 20.0, 30.0];
    assert_eq!(search_sorted(&values, -5.0, Rounding::Up), 0);
    assert_eq!(search_sorted(&values, -5.0, Rounding::Down), 0);
    assert_eq!(search_sorted(&values, -5.0, Rounding::Closest), 0);
    assert_eq!(search_sorted(&values, 99.0, Rounding::Up), 2);
    assert_eq!(search_sorted(&values, 99.0, Rounding::Down), 2);
    assert_eq!(search_sorted(&values, 99.0, Rounding::Closest), 2);
}

#[test]
fn between_samples_rounds_in_the_requested_direction() {
    let values = [0.0, 1.0, 2.0, 3.0];
    assert_eq!(search_sorted(&values, 1.3, Rounding::Up), 2);
    assert_eq!(search_sorted(&values, 1.3, Rounding::Down), 1);
    assert_eq!(search_sorted(&values, 1.3, Rounding::Closest), 1);
    assert_eq!(search_sorted(&values, 1.7, Rounding::Closest), 2);
}

#[test]
fn closest_breaks_ties_to_the_right() {
    let values = [0.0, 2.0, 4.0];
    assert_eq!(search_sorted(&values, 1.0, Rounding::Closest), 1);
    assert_eq!(search_sorted(&values, 3.0, Rounding::Closest), 2);
}

#[test]
fn empty_slice_yields_zero() {
    assert_eq!(search_sorted(&[], 1.0, Rounding::Closest), 0);
}
