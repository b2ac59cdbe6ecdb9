//! Slot generation -- turns one opening-hours block into bookable start times.
//!
//! A cursor walks the block in steps of the appointment duration. Each
//! candidate is accepted only if the whole appointment fits inside the
//! block, so a start time near closing is dropped when its appointment would
//! run past the end. An optional round-hour extension may add one trailing
//! start time afterwards.

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::range::{ceil_minutes, duration_minutes, range_contains, TimeRange};
use crate::schedule::midnight;

/// The start of a bookable appointment. Its end is implicitly
/// `slot + duration`.
pub type Slot = NaiveDateTime;

/// Parameters shared by every generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotOptions {
    /// Appointment length in minutes; also the cursor step.
    pub duration_minutes: u32,
    /// Offer the round hour reached by the last slot's end as one extra start.
    pub extend_to_next_hour: bool,
}

impl Default for SlotOptions {
    fn default() -> Self {
        Self {
            duration_minutes: 30,
            extend_to_next_hour: false,
        }
    }
}

impl SlotOptions {
    pub fn new(duration_minutes: u32) -> Self {
        Self {
            duration_minutes,
            extend_to_next_hour: false,
        }
    }

    pub fn extended(self) -> Self {
        Self {
            extend_to_next_hour: true,
            ..self
        }
    }

    /// # Errors
    /// Returns `SlotError::InvalidDuration` for a zero duration.
    pub fn validate(&self) -> Result<()> {
        if self.duration_minutes == 0 {
            return Err(SlotError::InvalidDuration(self.duration_minutes));
        }
        Ok(())
    }
}

/// Generate the ordered bookable start times inside `day_slot_range`.
///
/// The cursor runs from the block's start (minutes since midnight, rounded
/// up) through `start + length` inclusive. Acceptance is decided solely by
/// containment of `[candidate, candidate + duration]` in the block.
///
/// With `extend_to_next_hour`, if the last accepted slot's end crosses into a
/// new clock hour and lands exactly on minute 0, that instant is appended.
///
/// # Errors
/// Returns `SlotError::InvalidDuration` if `appointment_duration` is 0. Nothing
/// is computed in that case.
pub fn generate_slots(
    day_slot_range: &TimeRange,
    appointment_duration: u32,
    extend_to_next_hour: bool,
) -> Result<Vec<Slot>> {
    let options = SlotOptions {
        duration_minutes: appointment_duration,
        extend_to_next_hour,
    };
    generate_slots_with(day_slot_range, &options)
}

/// [`generate_slots`] taking a [`SlotOptions`].
pub fn generate_slots_with(day_slot_range: &TimeRange, options: &SlotOptions) -> Result<Vec<Slot>> {
    options.validate()?;

    let step = i64::from(options.duration_minutes);
    let day_start = midnight(day_slot_range.start().date());
    let first = ceil_minutes(day_slot_range.start() - day_start);
    let last = first + duration_minutes(day_slot_range);

    let mut slots = Vec::new();
    let mut cursor = first;
    while cursor <= last {
        // Past the last representable instant nothing further can fit.
        let Some(candidate) = at_minute(day_start, cursor) else {
            break;
        };
        let Some(appointment) = TimeRange::starting_at(candidate, options.duration_minutes) else {
            break;
        };
        if range_contains(day_slot_range, &appointment) {
            slots.push(candidate);
        }
        cursor += step;
    }

    if options.extend_to_next_hour {
        if let Some(next) = round_hour_extension(&slots, step) {
            slots.push(next);
        }
    }

    Ok(slots)
}

/// The instant `minute` minutes after `day_start`. Minutes past 23:59 roll
/// into the following day, which only happens for an all-day block. `None`
/// past the last representable instant.
fn at_minute(day_start: NaiveDateTime, minute: i64) -> Option<NaiveDateTime> {
    let (hour, minute) = (minute / 60, minute % 60);
    day_start
        .checked_add_signed(TimeDelta::hours(hour))?
        .checked_add_signed(TimeDelta::minutes(minute))
}

fn round_hour_extension(slots: &[Slot], step: i64) -> Option<Slot> {
    let last = *slots.last()?;
    let next = last.checked_add_signed(TimeDelta::minutes(step))?;
    (next.hour() != last.hour() && next.minute() == 0).then_some(next)
}
