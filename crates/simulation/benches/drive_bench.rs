//! Criterion benchmarks for the vehicle tick, bare and through the full app.
//!
//! Run with: cargo bench -p simulation --bench drive_bench --features bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use simulation::input_state::InputState;
use simulation::test_harness::TestDrive;
use simulation::vehicle::{TrailEmitter, VehicleMotionModel};

fn bench_motion_tick(c: &mut Criterion) {
    let input = InputState::forward().with_left();
    c.bench_function("motion_tick_1000", |b| {
        b.iter(|| {
            let mut model = VehicleMotionModel::default();
            for _ in 0..1000 {
                model.tick(black_box(input));
            }
            black_box(model.state().position)
        });
    });
}

fn bench_trail_tick(c: &mut Criterion) {
    c.bench_function("trail_tick_1000", |b| {
        b.iter(|| {
            let mut model = VehicleMotionModel::default();
            let mut trail = TrailEmitter::default();
            for _ in 0..1000 {
                let state = *model.tick(InputState::forward());
                black_box(trail.tick(&state));
            }
        });
    });
}

fn bench_app_frame(c: &mut Criterion) {
    let mut drive = TestDrive::new();
    c.bench_function("app_frame", |b| {
        b.iter(|| {
            drive.drive(InputState::forward().with_right(), 1);
        });
    });
}

criterion_group!(benches, bench_motion_tick, bench_trail_tick, bench_app_frame);
criterion_main!(benches);
