use criterion::{Criterion, criterion_group, criterion_main};
use sparkline_core::animation::AnimationConfig;
use sparkline_core::axis::{XAxisClusterPlanner, XAxisMetrics, compute_step};
use sparkline_core::core::{
    ChartState, Line, RangeMaxQuery, Rect, RmqStrategy, Series, Viewport,
};
use sparkline_core::render::{Color, NullRenderer, ScratchPool};
use sparkline_core::{ChartEngine, ChartEngineConfig};
use std::hint::black_box;

const DAY: f64 = 86_400.0;

fn generated_series(points: usize, lines: usize) -> Series {
    let xs = (0..points).map(|i| 1_542_412_800.0 + i as f64 * DAY).collect();
    let lines = (0..lines)
        .map(|line| {
            let phase = line as f64 * 0.37;
            let ys = (0..points)
                .map(|i| 1_000.0 + 400.0 * ((i as f64 * 0.05) + phase).sin() + (i % 17) as f64)
                .collect();
            Line::new(format!("line {line}"), Color::rgb(0.2, 0.4, 0.6), ys)
        })
        .collect();
    Series::new(xs, lines).expect("valid generated series")
}

fn bench_range_max_query_100k(c: &mut Criterion) {
    let series = generated_series(100_000, 4);
    let mut sparse = RangeMaxQuery::new(RmqStrategy::SparseTable);
    sparse.build(&series);
    let linear = RangeMaxQuery::new(RmqStrategy::LinearScan);

    c.bench_function("rmq_sparse_table_query_100k", |b| {
        b.iter(|| sparse.query_max(black_box(&series), black_box(10_000), black_box(90_000)))
    });
    c.bench_function("rmq_linear_scan_query_100k", |b| {
        b.iter(|| linear.query_max(black_box(&series), black_box(10_000), black_box(90_000)))
    });
    c.bench_function("rmq_sparse_table_build_100k", |b| {
        b.iter(|| {
            let mut rmq = RangeMaxQuery::new(RmqStrategy::SparseTable);
            rmq.build(black_box(&series));
            rmq
        })
    });
}

fn bench_axis_planning_10k(c: &mut Criterion) {
    let mut state = ChartState::new(RmqStrategy::SparseTable);
    state
        .bind_series(generated_series(10_000, 2))
        .expect("bind series");
    state
        .set_viewport_bounds(Rect::new(0.0, 4.0, 1_600.0, 872.0))
        .expect("bounds");
    state.set_horizontal_padding(16.0).expect("padding");

    let metrics = XAxisMetrics {
        label_width_px: 40.0,
        label_spacing_px: 8.0,
    };
    let mut planner = XAxisClusterPlanner::new(metrics, AnimationConfig::default());

    c.bench_function("x_axis_cluster_measure_10k", |b| {
        b.iter(|| planner.measure(black_box(&state)))
    });
    c.bench_function("y_axis_compute_step", |b| {
        b.iter(|| compute_step(black_box(13_862.0), black_box(868.0), black_box(29.0)))
    });
}

fn bench_frame_build_10k(c: &mut Criterion) {
    let config = ChartEngineConfig::new(Viewport::new(1_600, 900));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine
        .bind_series(generated_series(10_000, 4))
        .expect("bind series");
    engine
        .set_selection(0.25, 0.75, 0.0)
        .expect("selection");
    engine.jump_to_target_state();
    let mut pool = ScratchPool::new();

    c.bench_function("frame_build_10k", |b| {
        b.iter(|| engine.build_frame_with_pool(black_box(&mut pool)))
    });
}

criterion_group!(
    benches,
    bench_range_max_query_100k,
    bench_axis_planning_10k,
    bench_frame_build_10k
);
criterion_main!(benches);
