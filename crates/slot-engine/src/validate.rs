//! Working-hours check for a proposed appointment.
//!
//! Booking outside opening hours is allowed; a `false` result is a warning
//! for the caller to surface, not an error.

use crate::range::{any_range_contains, TimeRange};
use crate::schedule::WeekSchedule;

/// True iff `proposed` lies entirely inside one of the opening ranges of the
/// day it starts on.
///
/// The weekday and calendar date come from `proposed.start()`. A disabled
/// day always yields `false`. An appointment spanning two opening blocks
/// (e.g. across a lunch break) is outside working hours.
pub fn is_within_working_hours(week: &WeekSchedule, proposed: &TimeRange) -> bool {
    let date = proposed.start().date();
    let day = week.for_date(date);
    if !day.enabled {
        return false;
    }
    any_range_contains(&day.opening_ranges(date), proposed)
}
