use std::collections::BTreeSet;

use sparkline_core::animation::{AnimationConfig, Easing};
use sparkline_core::axis::{XAxisClusterPlanner, XAxisMetrics};
use sparkline_core::core::{ChartState, CoordinateTransformer, Line, Rect, RmqStrategy, Series};
use sparkline_core::format::{CachingFormatter, date_formatter};
use sparkline_core::render::{Color, TextHAlign};

const DAY: f64 = 86_400.0;
const START: f64 = 1_542_412_800.0;

fn metrics() -> XAxisMetrics {
    XAxisMetrics {
        label_width_px: 40.0,
        label_spacing_px: 8.0,
    }
}

fn daily_state(days: usize) -> ChartState {
    let xs = (0..days).map(|i| START + i as f64 * DAY).collect();
    let ys = (0..days).map(|i| 10.0 + (i % 7) as f64).collect();
    let series = Series::new(xs, vec![Line::new("visits", Color::rgb(0.2, 0.5, 0.8), ys)])
        .expect("valid series");
    let mut state = ChartState::new(RmqStrategy::SparseTable);
    state.bind_series(series).expect("bind");
    state
        .set_viewport_bounds(Rect::new(0.0, 4.0, 400.0, 272.0))
        .expect("bounds");
    state.set_horizontal_padding(16.0).expect("padding");
    state
}

fn round_index(value: f64) -> usize {
    (value + 0.5).floor() as usize
}

#[test]
fn clusters_get_strictly_narrower_down_to_single_steps() {
    let state = daily_state(100);
    let mut planner = XAxisClusterPlanner::new(metrics(), AnimationConfig::default());
    planner.measure(&state);

    let clusters = planner.clusters();
    assert!(clusters.len() >= 2);
    for pair in clusters.windows(2) {
        assert!(pair[0].min_chart_width() > pair[1].min_chart_width());
        assert!(pair[0].step() > pair[1].step());
    }
    let finest = clusters.last().expect("cluster");
    assert_eq!(finest.step(), 1.0);
    assert_eq!(finest.min_chart_width(), 0.0);
    assert!(clusters.iter().all(|cluster| cluster.step() >= 1.0));

    assert_eq!(
        planner.find_cluster_index(state.selection_width()),
        Some(planner.current_index())
    );
}

#[test]
fn full_selection_labels_match_union_of_visible_strides() {
    let state = daily_state(100);
    let mut transformer = CoordinateTransformer::new();
    transformer.rebuild(&state);
    let mut planner = XAxisClusterPlanner::new(metrics(), AnimationConfig::default());
    planner.measure(&state);
    let mut formatter = CachingFormatter::new(date_formatter("%b %-d"));

    let labels = planner.labels(&state, &transformer, &mut formatter);
    let drawn: BTreeSet<usize> = labels.iter().map(|label| label.index).collect();
    assert_eq!(drawn.len(), labels.len());

    let mut expected = BTreeSet::new();
    for cluster in &planner.clusters()[..=planner.current_index()] {
        let mut multiple = 0.0;
        loop {
            let index = round_index(cluster.step() * multiple);
            if index >= 100 {
                break;
            }
            expected.insert(index);
            multiple += 1.0;
        }
    }
    assert_eq!(drawn, expected);

    let first = labels.iter().find(|label| label.index == 0).expect("first label");
    assert_eq!(first.h_align, TextHAlign::Left);
    assert_eq!(first.text, "Nov 17");
    let last = labels.iter().find(|label| label.index == 99).expect("last label");
    assert_eq!(last.h_align, TextHAlign::Right);
    assert!(labels.iter().all(|label| label.alpha == 255));
}

#[test]
fn zooming_in_fades_finer_clusters_in() {
    let mut state = daily_state(100);
    let mut planner = XAxisClusterPlanner::new(metrics(), AnimationConfig::default());
    planner.measure(&state);
    let coarse = planner.current_index();

    state.set_selection(0.9, 1.0).expect("selection");
    assert!(planner.animate_changes(state.selection_width(), 0.0));
    let fine = planner.current_index();
    assert!(fine > coarse);
    for cluster in &planner.clusters()[coarse + 1..=fine] {
        assert_eq!(cluster.target_alpha(), 255);
        assert!(cluster.is_animating());
    }
    assert_eq!(planner.deepest_visible_index(), fine);

    assert!(planner.tick(150.0, state.selection_width()));
    assert!(!planner.tick(1_000.0, state.selection_width()));
    assert!(
        planner.clusters()[..=fine]
            .iter()
            .all(|cluster| cluster.alpha() == 255)
    );
}

#[test]
fn zooming_back_out_hides_finer_clusters() {
    let mut state = daily_state(100);
    let mut planner = XAxisClusterPlanner::new(metrics(), AnimationConfig::default());
    planner.measure(&state);
    let coarse = planner.current_index();

    state.set_selection(0.9, 1.0).expect("selection");
    planner.animate_changes(state.selection_width(), 0.0);
    planner.jump_to_target();

    state.set_selection(0.0, 1.0).expect("selection");
    assert!(planner.animate_changes(state.selection_width(), 1_000.0));
    assert_eq!(planner.current_index(), coarse);

    planner.tick(1_100.0, state.selection_width());
    planner.tick(2_000.0, state.selection_width());
    assert!(
        planner.clusters()[coarse + 1..]
            .iter()
            .all(|cluster| cluster.alpha() == 0)
    );
    assert_eq!(planner.deepest_visible_index(), coarse);
}

fn zoomed_in_linear_planner(state: &mut ChartState) -> XAxisClusterPlanner {
    let animation = AnimationConfig::default().with_easing(Easing::Linear);
    let mut planner = XAxisClusterPlanner::new(metrics(), animation);
    planner.measure(state);
    assert_eq!(planner.current_index(), 0);

    state.set_selection(0.9, 1.0).expect("selection");
    planner.animate_changes(state.selection_width(), 0.0);
    planner.jump_to_target();
    assert!(planner.current_index() >= 1);
    planner
}

#[test]
fn fade_out_is_dimmed_by_width_past_parent_threshold() {
    let mut state = daily_state(100);
    let mut planner = zoomed_in_linear_planner(&mut state);
    let x_range = state.series().expect("series").x_range();
    let parent_min = planner.clusters()[0].min_chart_width();
    assert!(parent_min < x_range);

    // Halfway between the parent's threshold and the full range.
    let width = (parent_min + x_range) / 2.0;
    state
        .set_selection(1.0 - width / x_range, 1.0)
        .expect("selection");
    assert!(planner.animate_changes(state.selection_width(), 1_000.0));
    assert_eq!(planner.current_index(), 0);

    // Half of a 300 ms linear fade leaves 127.5 before dimming.
    assert!(planner.tick(1_150.0, state.selection_width()));
    let dimming = (x_range - state.selection_width()) / (x_range - parent_min);
    let expected = 127.5 * dimming;
    let alpha = f64::from(planner.clusters()[1].alpha());
    assert!((alpha - expected).abs() <= 1.0, "alpha {alpha} expected {expected}");
    assert!(alpha < 127.0);
    assert!(alpha > 0.0);
    assert!(planner.clusters()[1].is_animating());
}

#[test]
fn fade_out_past_the_full_range_finishes_on_first_tick() {
    let mut state = daily_state(100);
    let mut planner = zoomed_in_linear_planner(&mut state);

    state.set_selection(0.0, 1.0).expect("selection");
    assert!(planner.animate_changes(state.selection_width(), 1_000.0));
    assert!(!planner.tick(1_010.0, state.selection_width()));

    let clusters = planner.clusters();
    assert_eq!(clusters[0].alpha(), 255);
    for cluster in &clusters[1..] {
        assert_eq!(cluster.alpha(), 0);
        assert!(!cluster.is_animating());
    }
    assert_eq!(planner.deepest_visible_index(), 0);
}

#[test]
fn unmeasured_planner_emits_nothing() {
    let state = ChartState::new(RmqStrategy::SparseTable);
    let mut planner = XAxisClusterPlanner::new(metrics(), AnimationConfig::default());
    planner.measure(&state);
    assert!(planner.clusters().is_empty());
    assert!(!planner.animate_changes(10.0, 0.0));
}
