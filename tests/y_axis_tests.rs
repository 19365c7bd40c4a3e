use sparkline_core::animation::AnimationConfig;
use sparkline_core::axis::{GRID_LINE_COUNT, YAxisStepPlanner, compute_step};
use sparkline_core::core::{ChartState, Line, Rect, RmqStrategy, Series};
use sparkline_core::render::Color;

const TOP_PADDING: f64 = 29.0;

fn state() -> ChartState {
    let series = Series::new(
        vec![0.0, 1.0, 2.0, 3.0],
        vec![
            Line::new("tall", Color::rgb(1.0, 0.0, 0.0), vec![100.0, 1000.0, 400.0, 200.0]),
            Line::new("short", Color::rgb(0.0, 0.0, 1.0), vec![120.0, 300.0, 80.0, 90.0]),
        ],
    )
    .expect("valid series");
    let mut state = ChartState::new(RmqStrategy::SparseTable);
    state.bind_series(series).expect("bind");
    state
        .set_viewport_bounds(Rect::new(0.0, 0.0, 400.0, 400.0))
        .expect("bounds");
    state
}

#[test]
fn reset_installs_an_opaque_grid_without_fades() {
    let state = state();
    let mut planner = YAxisStepPlanner::new(TOP_PADDING, AnimationConfig::default());
    planner.reset(&state);

    let grid = planner.current_grid().expect("grid");
    assert_eq!(grid.alpha(), 255);
    assert_eq!(grid.step(), compute_step(1000.0, 400.0, TOP_PADDING));
    for (i, row) in grid.rows().iter().enumerate() {
        assert_eq!(*row, (i + 1) as f64 * grid.step());
    }
    assert!(planner.disappearing_grids().is_empty());
}

#[test]
fn uninitialized_state_has_no_grid() {
    let mut planner = YAxisStepPlanner::new(TOP_PADDING, AnimationConfig::default());
    planner.reset(&ChartState::new(RmqStrategy::SparseTable));
    assert!(planner.current_grid().is_none());
    assert_eq!(planner.grids().count(), 0);
}

#[test]
fn step_change_cross_fades_and_retires_old_grid() {
    let mut state = state();
    let mut planner = YAxisStepPlanner::new(TOP_PADDING, AnimationConfig::default());
    planner.reset(&state);
    let old_step = planner.step();

    state.set_line_checked(0, false).expect("toggle");
    assert!(planner.animate_changes(&state, 0.0));
    assert_ne!(planner.step(), old_step);
    assert_eq!(planner.disappearing_grids().len(), 1);
    assert_eq!(planner.disappearing_grids()[0].step(), old_step);
    assert_eq!(planner.current_grid().expect("grid").alpha(), 0);
    assert_eq!(planner.grids().count(), 2);

    assert!(planner.tick(150.0));
    let fading_in = planner.current_grid().expect("grid").alpha();
    assert!(fading_in > 0 && fading_in < 255);

    assert!(!planner.tick(300.0));
    assert!(planner.disappearing_grids().is_empty());
    assert_eq!(planner.current_grid().expect("grid").alpha(), 255);
}

#[test]
fn unchanged_maximum_starts_nothing() {
    let state = state();
    let mut planner = YAxisStepPlanner::new(TOP_PADDING, AnimationConfig::default());
    planner.reset(&state);
    assert!(!planner.animate_changes(&state, 0.0));
    assert!(planner.disappearing_grids().is_empty());
}

#[test]
fn jump_to_target_drops_fading_grids() {
    let mut state = state();
    let mut planner = YAxisStepPlanner::new(TOP_PADDING, AnimationConfig::default());
    planner.reset(&state);
    state.set_line_checked(0, false).expect("toggle");
    planner.animate_changes(&state, 0.0);

    planner.jump_to_target();
    assert!(planner.disappearing_grids().is_empty());
    let grid = planner.current_grid().expect("grid");
    assert_eq!(grid.alpha(), 255);
    assert!(!grid.is_animating());
    assert_eq!(grid.rows().len(), GRID_LINE_COUNT);
}
