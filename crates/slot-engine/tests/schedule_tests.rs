//! Tests for the weekly opening-hours model and its JSON wire shape.

use chrono::{NaiveDate, NaiveDateTime};
use slot_engine::{Day, DaySchedule, OpeningHoursSlot, SlotError, TimeOfDay, WeekSchedule};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn t(h: u32, m: u32) -> TimeOfDay {
    TimeOfDay::new(h, m).unwrap()
}

fn slot(start: (u32, u32), end: (u32, u32)) -> OpeningHoursSlot {
    OpeningHoursSlot::between(t(start.0, start.1), t(end.0, end.1)).unwrap()
}

fn dt(s: &str) -> NaiveDateTime {
    s.parse().unwrap()
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

/// A full week JSON document where `monday` is substituted in and every
/// other day is closed.
fn week_json(monday: &str) -> String {
    let closed = |d: &str| format!(r#""{d}":{{"day":"{d}","enabled":false}}"#);
    format!(
        "{{\"monday\":{},{},{},{},{},{},{}}}",
        monday,
        closed("tuesday"),
        closed("wednesday"),
        closed("thursday"),
        closed("friday"),
        closed("saturday"),
        closed("sunday"),
    )
}

// ── TimeOfDay ───────────────────────────────────────────────────────────────

#[test]
fn time_of_day_rejects_out_of_range_values() {
    assert!(matches!(
        TimeOfDay::new(24, 0),
        Err(SlotError::InvalidTimeOfDay { hour: 24, minute: 0 })
    ));
    assert!(TimeOfDay::new(9, 60).is_err());
    assert!(TimeOfDay::new(23, 59).is_ok());
}

#[test]
fn time_of_day_parses_and_displays_hh_mm() {
    let time: TimeOfDay = "9:05".parse().unwrap();
    assert_eq!(time, t(9, 5));
    assert_eq!(time.to_string(), "09:05");
    assert!("nine".parse::<TimeOfDay>().is_err());
    assert!("25:00".parse::<TimeOfDay>().is_err());
}

#[test]
fn time_of_day_serializes_as_padded_strings() {
    let json = serde_json::to_string(&t(9, 5)).unwrap();
    assert_eq!(json, r#"{"hour":"09","minute":"05"}"#);
}

#[test]
fn time_of_day_accepts_strings_or_integers() {
    let a: TimeOfDay = serde_json::from_str(r#"{"hour":"09","minute":"30"}"#).unwrap();
    let b: TimeOfDay = serde_json::from_str(r#"{"hour":9,"minute":30}"#).unwrap();
    assert_eq!(a, b);
    assert!(serde_json::from_str::<TimeOfDay>(r#"{"hour":"24","minute":"00"}"#).is_err());
    assert!(serde_json::from_str::<TimeOfDay>(r#"{"hour":"xx","minute":"00"}"#).is_err());
}

#[test]
fn picker_options_step_by_precision() {
    let options = TimeOfDay::picker_options(15).unwrap();
    assert_eq!(options.len(), 96);
    assert_eq!(options[0], t(0, 0));
    assert_eq!(options[1], t(0, 15));
    assert_eq!(options[95], t(23, 45));

    // 7-minute precision does not land on 24:00.
    let options = TimeOfDay::picker_options(7).unwrap();
    assert_eq!(options.last(), Some(&t(23, 55)));

    assert_eq!(TimeOfDay::picker_options(1440).unwrap(), vec![t(0, 0)]);
}

#[test]
fn picker_options_reject_bad_precision() {
    assert!(matches!(
        TimeOfDay::picker_options(0),
        Err(SlotError::InvalidPrecision(0))
    ));
    assert!(TimeOfDay::picker_options(1441).is_err());
}

// ── OpeningHoursSlot ────────────────────────────────────────────────────────

#[test]
fn slot_start_must_precede_end() {
    assert!(OpeningHoursSlot::between(t(12, 0), t(9, 0)).is_err());
    assert!(OpeningHoursSlot::between(t(9, 0), t(9, 0)).is_err());
    assert!(OpeningHoursSlot::new(Some(t(9, 0)), None).is_ok());
}

#[test]
fn unset_slot_does_not_resolve() {
    assert_eq!(OpeningHoursSlot::unset().resolve(monday()), None);
    let half = OpeningHoursSlot::new(None, Some(t(17, 0))).unwrap();
    assert!(!half.is_configured());
    assert_eq!(half.resolve(monday()), None);
}

#[test]
fn slot_resolves_on_date() {
    let range = slot((9, 0), (17, 30)).resolve(monday()).unwrap();
    assert_eq!(range.start(), dt("2026-03-16T09:00:00"));
    assert_eq!(range.end(), dt("2026-03-16T17:30:00"));
}

#[test]
fn slot_json_with_nulls_is_unset() {
    let s: OpeningHoursSlot = serde_json::from_str(r#"{"start":null,"end":null}"#).unwrap();
    assert_eq!(s, OpeningHoursSlot::unset());
    let s: OpeningHoursSlot = serde_json::from_str("{}").unwrap();
    assert_eq!(s, OpeningHoursSlot::unset());
}

#[test]
fn slot_json_with_inverted_bounds_is_rejected() {
    let json = r#"{"start":{"hour":"12","minute":"00"},"end":{"hour":"09","minute":"00"}}"#;
    assert!(serde_json::from_str::<OpeningHoursSlot>(json).is_err());
}

// ── DaySchedule ─────────────────────────────────────────────────────────────

#[test]
fn disabled_day_has_no_ranges() {
    let mut day = DaySchedule::open(Day::Monday, vec![slot((9, 0), (17, 0))]);
    day.enabled = false;
    assert!(day.opening_ranges(monday()).is_empty());
}

#[test]
fn all_day_ignores_slots() {
    let mut day = DaySchedule::all_day(Day::Monday);
    day.slots = vec![slot((9, 0), (10, 0))];
    let ranges = day.opening_ranges(monday());
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].start(), dt("2026-03-16T00:00:00"));
    assert_eq!(ranges[0].end(), dt("2026-03-17T00:00:00"));
}

#[test]
fn opening_ranges_skip_unset_blocks_and_keep_order() {
    let day = DaySchedule::open(
        Day::Monday,
        vec![slot((13, 0), (17, 0)), OpeningHoursSlot::unset(), slot((8, 0), (12, 0))],
    );
    let ranges = day.opening_ranges(monday());
    assert_eq!(ranges.len(), 2);
    assert_eq!(ranges[0].start(), dt("2026-03-16T13:00:00"));
    assert_eq!(ranges[1].start(), dt("2026-03-16T08:00:00"));
}

// ── WeekSchedule ────────────────────────────────────────────────────────────

#[test]
fn ranges_past_the_last_date_are_skipped() {
    let last = NaiveDate::MAX;
    assert!(DaySchedule::all_day(Day::of(last)).opening_ranges(last).is_empty());

    let day = DaySchedule::open(Day::of(last), vec![slot((9, 0), (17, 0))]);
    let ranges = day.opening_ranges(last);
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].end(), last.and_hms_opt(17, 0, 0).unwrap());
}

#[test]
fn weekday_lookup_follows_the_calendar() {
    let week = WeekSchedule::closed().with_day(DaySchedule::all_day(Day::Monday));
    assert_eq!(Day::of(monday()), Day::Monday);
    assert!(week.for_date(monday()).all_day);
    assert!(!week.for_date(monday().succ_opt().unwrap()).enabled);
}

#[test]
fn with_day_leaves_original_untouched() {
    let original = WeekSchedule::closed();
    let updated = original.with_day(DaySchedule::all_day(Day::Friday));
    assert!(!original.day(Day::Friday).enabled);
    assert!(updated.day(Day::Friday).enabled);
    assert_eq!(updated.iter().filter(|d| d.enabled).count(), 1);
}

#[test]
fn uniform_copies_slots_to_every_day() {
    let week = WeekSchedule::uniform(&[slot((9, 0), (17, 0))]);
    for (schedule, day) in week.iter().zip(Day::ALL) {
        assert_eq!(schedule.day, day);
        assert!(schedule.enabled);
        assert_eq!(schedule.slots.len(), 1);
    }
}

#[test]
fn new_requires_monday_first_order() {
    let mut days = Day::ALL.map(DaySchedule::closed);
    days.swap(0, 1);
    assert!(WeekSchedule::new(days).is_err());
    assert!(WeekSchedule::new(Day::ALL.map(DaySchedule::closed)).is_ok());
}

#[test]
fn week_json_parses_mixed_component_types() {
    let json = week_json(
        r#"{"day":"monday","enabled":true,"allDay":false,"slots":[
            {"start":{"hour":"09","minute":"00"},"end":{"hour":12,"minute":0}},
            {"start":null,"end":null}
        ]}"#,
    );
    let week = WeekSchedule::from_json(&json).unwrap();
    let monday_schedule = week.day(Day::Monday);
    assert!(monday_schedule.enabled);
    assert_eq!(monday_schedule.slots.len(), 2);
    assert_eq!(monday_schedule.slots[0].end(), Some(t(12, 0)));
    assert!(!monday_schedule.slots[1].is_configured());
}

#[test]
fn week_json_roundtrips() {
    let week = WeekSchedule::uniform(&[slot((9, 0), (12, 0)), slot((13, 0), (17, 0))])
        .with_day(DaySchedule::closed(Day::Sunday));
    let json = week.to_json().unwrap();
    assert!(json.contains(r#""allDay":false"#));
    assert_eq!(WeekSchedule::from_json(&json).unwrap(), week);
}

#[test]
fn week_json_missing_day_is_rejected() {
    let json = r#"{"monday":{"day":"monday","enabled":false}}"#;
    assert!(WeekSchedule::from_json(json).is_err());
}

#[test]
fn week_json_mismatched_day_is_rejected() {
    let json = week_json(r#"{"day":"tuesday","enabled":true}"#);
    assert!(WeekSchedule::from_json(&json).is_err());
}

#[test]
fn week_json_unknown_day_is_rejected() {
    let json = week_json(r#"{"day":"monday","enabled":true}"#)
        .replacen('{', r#"{"funday":{"day":"monday","enabled":true},"#, 1);
    assert!(WeekSchedule::from_json(&json).is_err());
}

#[test]
fn week_json_duplicate_day_is_rejected() {
    let json = week_json(r#"{"day":"monday","enabled":false}"#)
        .replacen('{', r#"{"monday":{"day":"monday","enabled":true},"#, 1);
    let err = WeekSchedule::from_json(&json).unwrap_err();
    assert!(err.to_string().contains("duplicate schedule for monday"), "{}", err);
}

#[test]
fn day_names_parse_case_insensitively() {
    assert_eq!("Wednesday".parse::<Day>().unwrap(), Day::Wednesday);
    assert!("wed".parse::<Day>().is_err());
    assert_eq!(Day::Sunday.to_string(), "sunday");
}
