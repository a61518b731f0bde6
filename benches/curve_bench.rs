//! Curve and Animatable Benchmarks
//!
//! Run with: `cargo bench --bench curve_bench`

use std::cell::Cell;
use std::hint::black_box;
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use kinema::animation::{Animatable, AnimatedValue, Animation, Curve, CurveKey, TargetBinding};

fn dense_curve(keys: usize) -> Curve {
    let mut curve = Curve::from_keys(
        (0..keys)
            .map(|i| CurveKey::new(i as f32, (i as f32 * 0.7).sin() * 10.0))
            .collect(),
    );
    curve.smooth_all(1.0);
    curve
}

fn bench_curve_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve_evaluate");

    for keys in [2, 16, 128] {
        let curve = dense_curve(keys);
        let length = curve.length();
        group.bench_with_input(BenchmarkId::from_parameter(keys), &curve, |bench, curve| {
            bench.iter(|| {
                let mut sum = 0.0;
                for step in 0..100 {
                    sum += curve.evaluate(black_box(step as f32 * length / 100.0));
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

fn bench_curve_smooth(c: &mut Criterion) {
    c.bench_function("curve_smooth_all_128", |bench| {
        let mut curve = dense_curve(128);
        bench.iter(|| curve.smooth_all(black_box(0.8)));
    });
}

fn bench_animatable_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("animatable_update");

    for states in [1, 4, 16] {
        let cell = Rc::new(Cell::new(0.0_f32));
        let mut animatable = Animatable::new();
        for i in 0..states {
            let mut animation = Animation::new();
            for path in ["x", "y", "z"] {
                animation.add_value(
                    AnimatedValue::linear(path, 0.0_f32, i as f32, 1.0).with_target(TargetBinding::cell(Rc::clone(&cell))),
                );
            }
            animation.set_loop(kinema::LoopMode::Repeat);
            animatable.play(animation, &format!("state_{i}"));
        }

        group.bench_function(BenchmarkId::from_parameter(states), |bench| {
            bench.iter(|| animatable.update(black_box(1.0 / 60.0)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_curve_evaluate, bench_curve_smooth, bench_animatable_update);
criterion_main!(benches);
