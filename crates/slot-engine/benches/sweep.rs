use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::slots::{expand_slots, Constraints, WorkHours};
use slot_engine::timeline::compute_common_free_windows;
use slot_engine::{BusyBlock, BusySchedule, Interval};
use std::hint::black_box;

/// A panel of `subjects` people, each with a busy block every few hours for a week.
fn panel(subjects: u64) -> Vec<BusySchedule> {
    let base = Utc.with_ymd_and_hms(2030, 1, 7, 0, 0, 0).unwrap();
    (0..subjects)
        .map(|id| {
            let offset = id as i64 * 35;
            let busy = (0..40i64)
                .map(|i| {
                    let start = base + Duration::minutes((i * 250 + offset) % (7 * 24 * 60));
                    let length = 45 + (id as i64 % 4) * 15;
                    BusyBlock::new(start, start + Duration::minutes(length))
                })
                .collect();
            BusySchedule::new(id, format!("Interviewer {id}"), busy)
        })
        .collect()
}

fn bench_sweep(c: &mut Criterion) {
    let window = Interval::new(
        Utc.with_ymd_and_hms(2030, 1, 7, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2030, 1, 14, 0, 0, 0).unwrap(),
    )
    .unwrap();
    let constraints = Constraints::new(60, WorkHours::default());

    for subjects in [2u64, 8, 32] {
        let schedules = panel(subjects);
        c.bench_function(&format!("free_windows_{subjects}_subjects"), |b| {
            b.iter(|| compute_common_free_windows(black_box(&schedules), black_box(&window)))
        });

        let windows = compute_common_free_windows(&schedules, &window);
        c.bench_function(&format!("expand_slots_{subjects}_subjects"), |b| {
            b.iter(|| expand_slots(black_box(&windows), &constraints, window.start()))
        });
    }
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);
