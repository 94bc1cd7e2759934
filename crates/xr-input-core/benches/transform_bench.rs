//! Criterion benchmarks for parent-space pose conversion.
//!
//! Pose conversion runs for every pose mapping of every controller each frame,
//! so both orientation modes must stay well below a microsecond.
//!
//! Run with:
//! ```bash
//! cargo bench --package xr-input-core --bench transform_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Quat, Vec3};
use xr_input_core::{to_parent_space, OrientationMode, ParentTransform, Pose};

fn rig() -> ParentTransform {
    ParentTransform::from_euler_degrees(
        Vec3::new(0.0, 1.6, 2.0),
        Vec3::new(0.0, 135.0, 0.0),
        Vec3::splat(1.2),
    )
}

fn bench_to_parent_space(c: &mut Criterion) {
    let parent = rig();
    let local = Pose::new(Vec3::new(0.2, -0.3, 0.4), Quat::from_rotation_x(0.6));
    let mut group = c.benchmark_group("to_parent_space");

    group.bench_function("legacy_euler", |b| {
        b.iter(|| to_parent_space(black_box(local), Some(&parent), OrientationMode::LegacyEuler))
    });
    group.bench_function("quaternion", |b| {
        b.iter(|| to_parent_space(black_box(local), Some(&parent), OrientationMode::Quaternion))
    });
    group.bench_function("no_parent", |b| {
        b.iter(|| to_parent_space(black_box(local), None, OrientationMode::LegacyEuler))
    });

    group.finish();
}

criterion_group!(benches, bench_to_parent_space);
criterion_main!(benches);
