// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Insets, Point, Size};
use understory_sheet::{
    BottomSheet, Configuration, DragPhase, DragSample, HeightInputs, HeightResolver, Position,
    Release, SheetEvent, SnapResolver, SwitchablePositions,
};
use understory_timing::TimerQueue;

fn inputs() -> HeightInputs {
    let mut inputs = HeightInputs::new(Size::new(390.0, 844.0));
    inputs.safe_area = Insets::new(0.0, 47.0, 0.0, 34.0);
    inputs.header_content_height = 56.0;
    inputs.dynamic_main_content_height = 240.0;
    inputs
}

fn stops(count: usize) -> SwitchablePositions {
    SwitchablePositions::new(
        (0..count).map(|i| Position::Relative((i + 1) as f64 / (count + 1) as f64)),
    )
    .expect("count is non-zero")
}

fn bench_snap_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet/snap");
    let inputs = inputs();
    let config = Configuration::default().with_swipe_to_dismiss(true);

    for count in [2usize, 4, 8, 32] {
        let positions = stops(count);
        let releases: Vec<Release> = (0..256)
            .map(|i| Release {
                offset: f64::from(i) * 3.5,
                translation: if i % 2 == 0 { 30.0 } else { -30.0 },
                flick: if i % 7 == 0 { -80.0 } else { 5.0 },
            })
            .collect();
        group.throughput(Throughput::Elements(releases.len() as u64));

        group.bench_with_input(BenchmarkId::new("resolve", count), &releases, |b, releases| {
            b.iter(|| {
                let snap = SnapResolver::new(
                    &positions,
                    HeightResolver::new(&inputs, &config),
                    &config,
                );
                for release in releases {
                    black_box(snap.resolve(*release));
                }
            });
        });
    }

    group.finish();
}

fn bench_drag_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet/drag");

    // One full gesture per iteration: begin, N changes at 60 Hz, release.
    for samples in [16usize, 120, 600] {
        group.throughput(Throughput::Elements(samples as u64));
        group.bench_with_input(BenchmarkId::new("handle", samples), &samples, |b, &n| {
            b.iter_batched(
                || {
                    BottomSheet::new(
                        Position::Dynamic,
                        [Position::Dynamic, Position::Relative(0.9)],
                        Configuration::default(),
                    )
                    .expect("positions are not empty")
                    .with_inputs(inputs())
                },
                |mut sheet| {
                    let drag = |phase, y: f64, t: u64| SheetEvent::Drag {
                        phase,
                        sample: DragSample::new(Point::new(200.0, y), t),
                    };
                    sheet.handle(0, drag(DragPhase::Began, 600.0, 0));
                    let mut t = 0;
                    for i in 0..n {
                        t += 16;
                        let y = 600.0 - (i % 200) as f64;
                        black_box(sheet.handle(t, drag(DragPhase::Changed, y, t)));
                    }
                    black_box(sheet.handle(t + 16, drag(DragPhase::Ended, 500.0, t + 16)));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_timer_supersede(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing/supersede");

    // Rapid rotations: the same key is rescheduled many times before it fires.
    for reschedules in [8u64, 64, 512] {
        group.throughput(Throughput::Elements(reschedules));
        group.bench_with_input(
            BenchmarkId::new("schedule_then_drain", reschedules),
            &reschedules,
            |b, &n| {
                b.iter_batched(
                    TimerQueue::<u8>::new,
                    |mut queue| {
                        for i in 0..n {
                            queue.schedule(0, i * 10 + 300);
                        }
                        black_box(queue.drain_due(u64::MAX).count());
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_snap_resolution,
    bench_drag_stream,
    bench_timer_supersede
);
criterion_main!(benches);
