use approx::relative_eq;
use glam::DVec2;
use proptest::prelude::*;
use sparkline_core::core::{ChartState, CoordinateTransformer, Line, Rect, RmqStrategy, Series};
use sparkline_core::render::Color;

#[derive(Debug, Clone, Copy)]
enum ViewChange {
    Selection { from: f64, span: f64 },
    Bounds { width: f64, height: f64 },
    Padding(f64),
}

fn view_change() -> impl Strategy<Value = ViewChange> {
    prop_oneof![
        (0.0f64..0.8, 0.05f64..0.2).prop_map(|(from, span)| ViewChange::Selection { from, span }),
        (120.0f64..2_000.0, 80.0f64..1_200.0)
            .prop_map(|(width, height)| ViewChange::Bounds { width, height }),
        (0.0f64..50.0).prop_map(ViewChange::Padding),
    ]
}

fn apply(state: &mut ChartState, change: ViewChange) {
    match change {
        ViewChange::Selection { from, span } => {
            state.set_selection(from, from + span).expect("selection");
        }
        ViewChange::Bounds { width, height } => {
            state
                .set_viewport_bounds(Rect::new(0.0, 4.0, width, 4.0 + height))
                .expect("bounds");
        }
        ViewChange::Padding(padding) => {
            state.set_horizontal_padding(padding).expect("padding");
        }
    }
}

proptest! {
    #[test]
    fn surface_round_trip_survives_view_changes(
        changes in prop::collection::vec(view_change(), 1..8),
        x in 0.0f64..100.0,
        y in 0.0f64..500.0
    ) {
        let xs = (0..=100_i32).map(f64::from).collect();
        let ys = (0..=100_i32).map(|i| 100.0 + 3.0 * f64::from(i)).collect();
        let series = Series::new(xs, vec![Line::new("a", Color::rgb(0.0, 0.0, 0.0), ys)])
            .expect("valid series");

        let mut state = ChartState::new(RmqStrategy::SparseTable);
        state.bind_series(series).expect("bind");
        state
            .set_viewport_bounds(Rect::new(0.0, 4.0, 400.0, 304.0))
            .expect("bounds");

        let mut transformer = CoordinateTransformer::new();
        for change in changes {
            apply(&mut state, change);
            prop_assert!(transformer.rebuild(&state));

            let surface = transformer.data_to_surface(DVec2::new(x, y));
            let back = transformer.surface_to_data(surface).expect("invertible");
            prop_assert!(relative_eq!(back.x, x, epsilon = 1e-6, max_relative = 1e-9));
            prop_assert!(relative_eq!(back.y, y, epsilon = 1e-6, max_relative = 1e-9));
        }
    }
}
