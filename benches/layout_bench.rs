//! Layout, easing and idle-float throughput.
#![allow(missing_docs)]

use cardview::controller::idle_offset;
use cardview::layout::{sphere_positions, GridLayout};
use cardview::options::{AnimationOptions, LayoutOptions};
use cardview::util::easing::EasingFunction;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::CubicInOut;
    let _ = c.bench_function("cubic_in_out_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.37))));
    });
}

fn layout_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let opts = LayoutOptions::default();

    for count in [12_usize, 100, 1000] {
        let _ = group.bench_function(format!("sphere_{count}"), |b| {
            b.iter(|| black_box(sphere_positions(black_box(count), opts.sphere_radius)));
        });
        let _ = group.bench_function(format!("grid_{count}"), |b| {
            b.iter(|| black_box(GridLayout::from_options(black_box(count), &opts).positions()));
        });
    }

    group.finish();
}

fn idle_float_benchmark(c: &mut Criterion) {
    let opts = AnimationOptions::default();
    let _ = c.bench_function("idle_offset_100_cards", |b| {
        b.iter(|| {
            for i in 0..100 {
                let _ = black_box(idle_offset(i, black_box(123_456.0), &opts));
            }
        });
    });
}

criterion_group!(
    benches,
    easing_benchmark,
    layout_benchmark,
    idle_float_benchmark
);
criterion_main!(benches);
