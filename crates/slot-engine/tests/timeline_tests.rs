//! Tests for merging busy schedules into common-free windows.

use chrono::{DateTime, Duration, TimeZone, Utc};
use slot_engine::schedule::{BusyBlock, BusySchedule};
use slot_engine::timeline::{common_free_windows_between, compute_common_free_windows, sweep_events};
use slot_engine::Interval;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, h, m, 0).unwrap()
}

fn span(sh: u32, sm: u32, eh: u32, em: u32) -> Interval {
    Interval::new(at(sh, sm), at(eh, em)).unwrap()
}

fn busy(sh: u32, sm: u32, eh: u32, em: u32) -> BusyBlock {
    BusyBlock::new(at(sh, sm), at(eh, em))
}

fn person(id: u64, name: &str, blocks: Vec<BusyBlock>) -> BusySchedule {
    BusySchedule::new(id, name, blocks)
}

fn workday() -> Interval {
    span(9, 0, 17, 0)
}

// ── Empty inputs ────────────────────────────────────────────────────────────

#[test]
fn no_subjects_yields_whole_window() {
    let windows = compute_common_free_windows(&[], &workday());
    assert_eq!(windows, vec![workday()]);
}

#[test]
fn subjects_without_busy_blocks_yield_whole_window() {
    let schedules = vec![person(1, "Alice", vec![]), person(2, "Bob", vec![])];
    let windows = compute_common_free_windows(&schedules, &workday());
    assert_eq!(windows, vec![workday()]);
}

#[test]
fn inverted_raw_window_yields_nothing() {
    assert!(common_free_windows_between(&[], at(17, 0), at(9, 0)).is_empty());
    assert!(common_free_windows_between(&[], at(9, 0), at(9, 0)).is_empty());
}

// ── Fixture day ─────────────────────────────────────────────────────────────

#[test]
fn two_interviewers_fixture_day() {
    let schedules = vec![
        person(1, "Alice", vec![busy(9, 30, 10, 30), busy(13, 0, 13, 30)]),
        person(2, "Bob", vec![busy(10, 0, 11, 0), busy(15, 30, 17, 0)]),
    ];

    let windows = compute_common_free_windows(&schedules, &workday());

    assert_eq!(
        windows,
        vec![span(9, 0, 9, 30), span(11, 0, 13, 0), span(13, 30, 15, 30)]
    );
}

// ── Clipping ────────────────────────────────────────────────────────────────

#[test]
fn busy_outside_window_is_ignored() {
    let schedules = vec![person(
        1,
        "Alice",
        vec![busy(6, 0, 8, 0), busy(17, 0, 19, 0)],
    )];
    let windows = compute_common_free_windows(&schedules, &workday());
    assert_eq!(windows, vec![workday()]);
}

#[test]
fn busy_straddling_window_edges_is_clipped() {
    let schedules = vec![person(
        1,
        "Alice",
        vec![busy(8, 0, 10, 0), busy(16, 0, 18, 0)],
    )];
    let windows = compute_common_free_windows(&schedules, &workday());
    assert_eq!(windows, vec![span(10, 0, 16, 0)]);
}

#[test]
fn busy_covering_whole_window_leaves_nothing() {
    let schedules = vec![person(1, "Alice", vec![busy(8, 0, 18, 0)])];
    assert!(compute_common_free_windows(&schedules, &workday()).is_empty());
}

// ── Tie-breaks and overlaps ─────────────────────────────────────────────────

#[test]
fn touching_intervals_from_different_subjects_leave_no_gap() {
    let schedules = vec![
        person(1, "Alice", vec![busy(10, 0, 11, 0)]),
        person(2, "Bob", vec![busy(11, 0, 12, 0)]),
    ];
    let windows = compute_common_free_windows(&schedules, &workday());
    assert_eq!(windows, vec![span(9, 0, 10, 0), span(12, 0, 17, 0)]);
}

#[test]
fn free_instant_between_touching_blocks_sorts_release_first() {
    let schedules = vec![
        person(1, "Alice", vec![busy(10, 0, 11, 0)]),
        person(2, "Bob", vec![busy(11, 0, 12, 0)]),
    ];
    let events = sweep_events(&schedules, &workday());
    let eleven = at(11, 0).timestamp_micros();

    let at_eleven: Vec<i8> = events
        .iter()
        .filter(|e| e.at == eleven)
        .map(|e| e.delta)
        .collect();
    assert_eq!(at_eleven, vec![-1, 1]);
}

#[test]
fn free_window_boundary_exists_where_busy_ends() {
    // Only Alice is busy before 11:00, so the free window starts exactly at 11:00.
    let schedules = vec![
        person(1, "Alice", vec![busy(10, 0, 11, 0)]),
        person(2, "Bob", vec![]),
    ];
    let windows = compute_common_free_windows(&schedules, &workday());
    assert_eq!(windows[1].start(), at(11, 0));
}

#[test]
fn overlapping_busy_blocks_merge() {
    let schedules = vec![
        person(1, "Alice", vec![busy(10, 0, 12, 0), busy(11, 0, 11, 30)]),
        person(2, "Bob", vec![busy(11, 30, 13, 0)]),
        person(3, "Carol", vec![busy(12, 0, 14, 0)]),
    ];
    let windows = compute_common_free_windows(&schedules, &workday());
    assert_eq!(windows, vec![span(9, 0, 10, 0), span(14, 0, 17, 0)]);
}

#[test]
fn duplicate_blocks_count_once_each_and_release_together() {
    let schedules = vec![
        person(1, "Alice", vec![busy(10, 0, 11, 0)]),
        person(2, "Bob", vec![busy(10, 0, 11, 0)]),
    ];
    let windows = compute_common_free_windows(&schedules, &workday());
    assert_eq!(windows, vec![span(9, 0, 10, 0), span(11, 0, 17, 0)]);
}

// ── Malformed blocks ────────────────────────────────────────────────────────

#[test]
fn malformed_blocks_are_skipped() {
    let schedules = vec![person(
        1,
        "Alice",
        vec![
            // Inverted.
            busy(12, 0, 11, 0),
            // Zero length.
            busy(13, 0, 13, 0),
            // Missing end.
            BusyBlock {
                start: Some("2030-01-01T14:00:00Z".to_string()),
                end: None,
            },
            // Unparseable.
            BusyBlock {
                start: Some("yesterday".to_string()),
                end: Some("2030-01-01T15:00:00Z".to_string()),
            },
            // The only valid one.
            busy(10, 0, 10, 30),
        ],
    )];

    let windows = compute_common_free_windows(&schedules, &workday());
    assert_eq!(windows, vec![span(9, 0, 10, 0), span(10, 30, 17, 0)]);
}

#[test]
fn offset_timestamps_are_normalized() {
    let schedules = vec![person(
        1,
        "Alice",
        vec![BusyBlock {
            start: Some("2030-01-01T12:00:00+02:00".to_string()),
            end: Some("2030-01-01T13:00:00+02:00".to_string()),
        }],
    )];
    let windows = compute_common_free_windows(&schedules, &workday());
    assert_eq!(windows, vec![span(9, 0, 10, 0), span(11, 0, 17, 0)]);
}

#[test]
fn wire_aliases_start_time_and_end_time_are_accepted() {
    let json = r#"[{"interviewerId": 7, "name": "Dana",
        "busy": [{"startTime": "2030-01-01T09:00:00Z", "endTime": "2030-01-01T12:00:00Z"}]}]"#;
    let schedules: Vec<BusySchedule> = serde_json::from_str(json).unwrap();
    let windows = compute_common_free_windows(&schedules, &workday());
    assert_eq!(windows, vec![span(12, 0, 17, 0)]);
}

// ── Sub-microsecond precision ───────────────────────────────────────────────

#[test]
fn sub_microsecond_busy_bounds_round_outward() {
    let busy_end = at(11, 0) + Duration::nanoseconds(500);
    let busy_start = at(12, 0) + Duration::nanoseconds(500);
    let schedules = vec![person(
        1,
        "Alice",
        vec![
            BusyBlock::new(at(10, 0), busy_end),
            BusyBlock::new(busy_start, at(13, 0)),
        ],
    )];

    let windows = compute_common_free_windows(&schedules, &workday());

    assert_eq!(windows.len(), 3);
    assert_eq!(windows[0], span(9, 0, 10, 0));
    assert_eq!(windows[1].start(), at(11, 0) + Duration::microseconds(1));
    assert_eq!(windows[1].end(), at(12, 0));
    assert_eq!(windows[2], span(13, 0, 17, 0));

    for block in &schedules[0].busy {
        let busy = block.interval().unwrap();
        assert!(windows.iter().all(|w| !w.overlaps(&busy)));
    }
}

#[test]
fn sub_microsecond_window_bounds_round_inward() {
    let window = Interval::new(
        at(9, 0) + Duration::nanoseconds(1),
        at(17, 0) + Duration::nanoseconds(999),
    )
    .unwrap();

    let windows = compute_common_free_windows(&[], &window);

    assert_eq!(
        windows,
        vec![Interval::new(at(9, 0) + Duration::microseconds(1), at(17, 0)).unwrap()]
    );
}
