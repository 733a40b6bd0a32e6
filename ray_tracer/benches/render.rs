use std::f64::consts::PI;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ray_tracer::prelude::*;

fn criterion_benchmark(c: &mut Criterion) {
    let world = World::default();
    let camera = Camera::new(50, 50, PI / 2.)
        .with_transform(view_transform(
            Point::new(0., 0., -5.),
            Point::origin(),
            Vector::new(0., 1., 0.),
        ))
        .unwrap();

    c.bench_function("render default world 50x50", |b| {
        b.iter(|| world.render(black_box(&camera)))
    });

    let ray = camera.ray_for_pixel(25, 25);
    c.bench_function("color at center pixel", |b| {
        b.iter(|| world.color_at(black_box(&ray)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
