//! Benchmarks for the per-tick controller path.

use criterion::{Criterion, criterion_group, criterion_main};
use robodriver_core::prelude::*;
use robodriver_model::{Drivetrain, SegmentId};
use robodriver_test_helpers::prelude::*;
use std::hint::black_box;

fn bench_tick(c: &mut Criterion) {
    let track = TrackFixture::oval();
    let mut driver = must(RobotDriver::new_race(
        &CarFixture::winged(Drivetrain::All),
        DriverParams::default(),
        RaceConfig::default(),
    ));

    let cruising = VehicleFixture::rolling(35.0).on_segment(0, 20.0).build();
    c.bench_function("tick_cruising", |b| {
        b.iter(|| black_box(driver.tick(black_box(&track), black_box(&cruising))))
    });

    let approaching = VehicleFixture::rolling(70.0).on_segment(0, 300.0).build();
    c.bench_function("tick_braking_lookahead", |b| {
        b.iter(|| black_box(driver.tick(black_box(&track), black_box(&approaching))))
    });
}

fn bench_cornering(c: &mut Criterion) {
    let track = TrackFixture::oval();
    let driver = must(RobotDriver::new_race(
        &CarFixture::winged(Drivetrain::Rear),
        DriverParams::default(),
        RaceConfig::default(),
    ));
    let curve = must_some(track.segment(SegmentId(1)), "curve");

    c.bench_function("cornering_max_speed", |b| {
        b.iter(|| black_box(driver.cornering().max_speed(black_box(curve))))
    });
}

criterion_group!(benches, bench_tick, bench_cornering);
criterion_main!(benches);
