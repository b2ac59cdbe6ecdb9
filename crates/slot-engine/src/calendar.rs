//! Multi-day listing for the booking-flow calendar.
//!
//! Runs the per-day aggregator over a date span and marks which dates a
//! customer can pick. Existing bookings are not inspected here: callers pass
//! the dates they already know to be fully booked.

use std::collections::BTreeSet;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::aggregate::{flatten, generate_day_slots, BlockSlots};
use crate::error::{Result, SlotError};
use crate::generator::{Slot, SlotOptions};
use crate::schedule::{Day, WeekSchedule};

/// One date of a calendar listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: Day,
    /// Slots per opening block, in block order.
    pub blocks: Vec<BlockSlots>,
    /// Not marked unavailable and at least one slot exists.
    pub selectable: bool,
}

impl CalendarDay {
    pub fn flat_slots(&self) -> Vec<Slot> {
        flatten(&self.blocks)
    }
}

/// List every date in `[from, to]` with its generated slots.
///
/// # Errors
/// `SlotError::InvalidDateRange` if `to` is before `from`;
/// `SlotError::InvalidDuration` for a zero duration.
pub fn list_calendar(
    week: &WeekSchedule,
    from: NaiveDate,
    to: NaiveDate,
    options: &SlotOptions,
    unavailable_days: &BTreeSet<NaiveDate>,
) -> Result<Vec<CalendarDay>> {
    if to < from {
        return Err(SlotError::InvalidDateRange(format!(
            "{} is before {}",
            to, from
        )));
    }
    options.validate()?;

    from.iter_days()
        .take_while(|date| *date <= to)
        .map(|date| -> Result<CalendarDay> {
            let blocks = generate_day_slots(week.for_date(date), date, options)?;
            let has_slots = blocks.iter().any(|b| !b.slots.is_empty());
            Ok(CalendarDay {
                date,
                day: Day::of(date),
                selectable: has_slots && !unavailable_days.contains(&date),
                blocks,
            })
        })
        .collect()
}

/// [`list_calendar`] over a whole calendar month.
///
/// # Errors
/// `SlotError::InvalidDateRange` for a month outside 1..=12 or an
/// unrepresentable year.
pub fn month_calendar(
    week: &WeekSchedule,
    year: i32,
    month: u32,
    options: &SlotOptions,
    unavailable_days: &BTreeSet<NaiveDate>,
) -> Result<Vec<CalendarDay>> {
    let invalid = || SlotError::InvalidDateRange(format!("no such month {}-{:02}", year, month));
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(invalid)?;
    list_calendar(week, first, last, options, unavailable_days)
}
