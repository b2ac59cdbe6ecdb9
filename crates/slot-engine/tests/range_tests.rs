//! Tests for time-range construction, containment, and ceiling-rounded length.

use chrono::{FixedOffset, NaiveDateTime, TimeZone};
use slot_engine::range::{any_range_contains, duration_minutes, range_contains, TimeRange};
use slot_engine::SlotError;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn dt(s: &str) -> NaiveDateTime {
    s.parse().unwrap()
}

fn range(start: &str, end: &str) -> TimeRange {
    TimeRange::new(dt(start), dt(end)).unwrap()
}

// ── Construction ────────────────────────────────────────────────────────────

#[test]
fn end_before_start_is_rejected() {
    let err = TimeRange::new(dt("2026-03-16T10:00:00"), dt("2026-03-16T09:00:00")).unwrap_err();
    assert!(matches!(err, SlotError::InvalidRange { .. }));
}

#[test]
fn empty_range_is_allowed() {
    let r = range("2026-03-16T10:00:00", "2026-03-16T10:00:00");
    assert_eq!(r.duration_minutes(), 0);
}

#[test]
fn zoned_instants_keep_their_wall_clock() {
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    let start = tz.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap();
    let end = tz.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap();

    let r = TimeRange::from_zoned(&start, &end).unwrap();
    assert_eq!(r.start(), dt("2026-03-16T09:00:00"));
    assert_eq!(r.end(), dt("2026-03-16T10:00:00"));
}

#[test]
fn range_deserialization_rejects_inverted_bounds() {
    let json = r#"{"start":"2026-03-16T10:00:00","end":"2026-03-16T09:00:00"}"#;
    assert!(serde_json::from_str::<TimeRange>(json).is_err());

    let json = r#"{"start":"2026-03-16T09:00:00","end":"2026-03-16T10:00:00"}"#;
    let r: TimeRange = serde_json::from_str(json).unwrap();
    assert_eq!(r.duration_minutes(), 60);
}

// ── Containment ─────────────────────────────────────────────────────────────

#[test]
fn touching_boundaries_are_contained() {
    let outer = range("2026-03-16T09:00:00", "2026-03-16T17:00:00");

    assert!(range_contains(&outer, &range("2026-03-16T09:00:00", "2026-03-16T10:00:00")));
    assert!(range_contains(&outer, &range("2026-03-16T16:00:00", "2026-03-16T17:00:00")));
    assert!(range_contains(&outer, &outer));
}

#[test]
fn overhanging_ranges_are_not_contained() {
    let outer = range("2026-03-16T09:00:00", "2026-03-16T17:00:00");

    assert!(!range_contains(&outer, &range("2026-03-16T08:59:00", "2026-03-16T10:00:00")));
    assert!(!range_contains(&outer, &range("2026-03-16T16:30:00", "2026-03-16T17:00:01")));
    assert!(!range_contains(&outer, &range("2026-03-16T08:00:00", "2026-03-16T18:00:00")));
}

#[test]
fn any_range_contains_checks_each_block() {
    let blocks = vec![
        range("2026-03-16T09:00:00", "2026-03-16T12:00:00"),
        range("2026-03-16T13:00:00", "2026-03-16T17:00:00"),
    ];

    assert!(any_range_contains(&blocks, &range("2026-03-16T14:00:00", "2026-03-16T15:00:00")));
    // Straddles the lunch gap: neither block holds all of it.
    assert!(!any_range_contains(&blocks, &range("2026-03-16T11:30:00", "2026-03-16T13:30:00")));
}

#[test]
fn any_range_contains_is_false_for_no_blocks() {
    let inner = range("2026-03-16T09:00:00", "2026-03-16T10:00:00");
    assert!(!any_range_contains(&[], &inner));
}

// ── Duration ────────────────────────────────────────────────────────────────

#[test]
fn duration_rounds_up_partial_minutes() {
    assert_eq!(duration_minutes(&range("2026-03-16T09:00:00", "2026-03-16T09:01:01")), 2);
    assert_eq!(duration_minutes(&range("2026-03-16T09:00:00", "2026-03-16T09:01:00")), 1);
    assert_eq!(duration_minutes(&range("2026-03-16T09:00:00", "2026-03-16T09:00:01")), 1);
}

#[test]
fn duration_spans_midnight_when_built_across_dates() {
    assert_eq!(duration_minutes(&range("2026-03-16T00:00:00", "2026-03-17T00:00:00")), 1440);
}
