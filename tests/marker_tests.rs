use glam::DVec2;
use sparkline_core::core::{Line, Series, Viewport};
use sparkline_core::interaction::MarkerVisibility;
use sparkline_core::render::{Color, NullRenderer};
use sparkline_core::{ChartEngine, ChartEngineConfig};

const DAY: f64 = 86_400.0;
const START: f64 = 1_542_412_800.0;

fn engine() -> ChartEngine<NullRenderer> {
    let xs: Vec<f64> = (0..10).map(|i| START + f64::from(i) * DAY).collect();
    let series = Series::new(
        xs,
        vec![
            Line::new(
                "joined",
                Color::rgb(0.24, 0.76, 0.25),
                vec![40.0, 42.0, 50.0, 61.0, 48.0, 55.0, 70.0, 66.0, 58.0, 60.0],
            ),
            Line::new(
                "left",
                Color::rgb(0.93, 0.33, 0.29),
                vec![5.0, 8.0, 6.0, 9.0, 12.0, 10.0, 11.0, 7.0, 9.0, 14.0],
            ),
        ],
    )
    .expect("valid series");
    let mut engine = ChartEngine::new(
        NullRenderer::default(),
        ChartEngineConfig::new(Viewport::new(400, 300)),
    )
    .expect("engine");
    engine.bind_series(series).expect("bind");
    engine
}

fn surface_x(engine: &ChartEngine<NullRenderer>, x: f64) -> f64 {
    engine.transformer().data_to_surface(DVec2::new(x, 0.0)).x
}

#[test]
fn tap_between_samples_picks_the_closer_one_and_fades_in() {
    let mut engine = engine();
    assert_eq!(engine.marker().visibility(), MarkerVisibility::Gone);

    let x = surface_x(&engine, START + 5.7 * DAY);
    engine.pointer_down(x, 100.0);
    assert!(engine.pointer_up(x, 100.0, 0.0));

    let marker = engine.marker();
    assert_eq!(marker.index(), 6);
    assert_eq!(marker.visibility(), MarkerVisibility::Visible);
    assert_eq!(marker.target_alpha(), 255);
    assert_eq!(marker.alpha(), 0);

    assert!(engine.tick(150.0));
    let mid = engine.marker().alpha();
    assert!(mid > 0 && mid < 255);
    assert!(!engine.tick(300.0));
    assert_eq!(engine.marker().alpha(), 255);
}

#[test]
fn drag_follows_pointer_without_refading() {
    let mut engine = engine();
    let x = surface_x(&engine, START + 2.0 * DAY);
    engine.pointer_down(x, 100.0);
    assert!(engine.pointer_move(x, 100.0, 0.0));
    engine.jump_to_target_state();

    let next = surface_x(&engine, START + 3.2 * DAY);
    assert!(engine.pointer_move(next, 100.0, 10.0));
    assert_eq!(engine.marker().index(), 3);
    assert_eq!(engine.marker().alpha(), 255);
    assert!(!engine.marker().is_animating());

    // Same sample again is not a move.
    assert!(!engine.pointer_move(next + 1.0, 100.0, 20.0));
}

#[test]
fn releasing_on_the_bubble_dismisses_the_marker() {
    let mut engine = engine();
    let x = surface_x(&engine, START + 6.0 * DAY);
    engine.pointer_down(x, 100.0);
    engine.pointer_up(x, 100.0, 0.0);
    engine.tick(300.0);

    let frame = engine.build_frame();
    let bubble = frame.bubble.expect("bubble");
    let bounds = engine.marker().bubble_bounds();
    assert_eq!(bubble.bounds, bounds);

    let center_x = (bounds.left + bounds.right) / 2.0;
    let center_y = (bounds.top + bounds.bottom) / 2.0;
    engine.pointer_down(center_x, center_y);
    assert!(engine.pointer_up(center_x, center_y, 400.0));
    assert_eq!(engine.marker().visibility(), MarkerVisibility::Gone);
    assert_eq!(engine.marker().target_alpha(), 0);
    assert_eq!(engine.marker().index(), 6);
}

#[test]
fn bubble_stays_inside_the_horizontal_margins() {
    let mut engine = engine();
    let x = surface_x(&engine, START);
    engine.pointer_up(x, 100.0, 0.0);
    engine.jump_to_target_state();
    engine.build_frame();

    let bounds = engine.marker().bubble_bounds();
    let margin = engine.marker().metrics().horizontal_margin_px;
    assert!(bounds.left >= margin - 1e-9);
    assert!(bounds.width() > 0.0);
}

#[test]
fn pointer_is_ignored_while_nothing_is_checked() {
    let mut engine = engine();
    engine.set_line_checked(0, false, 0.0).expect("toggle");
    engine.set_line_checked(1, false, 0.0).expect("toggle");

    let x = surface_x(&engine, START + 4.0 * DAY);
    engine.pointer_down(x, 100.0);
    assert!(!engine.pointer_up(x, 100.0, 10.0));
    assert_eq!(engine.marker().visibility(), MarkerVisibility::Gone);
}

#[test]
fn unchecking_everything_fades_a_visible_marker() {
    let mut engine = engine();
    let x = surface_x(&engine, START + 4.0 * DAY);
    engine.pointer_up(x, 100.0, 0.0);
    engine.jump_to_target_state();

    engine.set_line_checked(0, false, 100.0).expect("toggle");
    assert_eq!(engine.marker().target_alpha(), 255);
    engine.set_line_checked(1, false, 100.0).expect("toggle");
    assert_eq!(engine.marker().target_alpha(), 0);

    engine.set_line_checked(1, true, 200.0).expect("toggle");
    assert_eq!(engine.marker().target_alpha(), 255);
}

#[test]
fn narrowing_selection_clamps_marker_index() {
    let mut engine = engine();
    let x = surface_x(&engine, START + 9.0 * DAY);
    engine.pointer_up(x, 100.0, 0.0);
    assert_eq!(engine.marker().index(), 9);

    engine.set_selection(0.0, 0.5, 10.0).expect("selection");
    let last_inside = *engine.state().selection_index_range().end();
    assert_eq!(engine.marker().index(), last_inside);
}
