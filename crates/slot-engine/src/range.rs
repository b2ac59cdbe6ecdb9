//! Time-range primitives: construction, containment, and ceiling-rounded length.
//!
//! Ranges are `[start, end)` pairs of wall-clock instants. Containment is
//! closed on both ends: an inner range that touches the outer boundaries is
//! still contained.

use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// An ordered pair of wall-clock instants with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Deserialize)]
struct RawRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<RawRange> for TimeRange {
    type Error = SlotError;

    fn try_from(raw: RawRange) -> Result<Self> {
        TimeRange::new(raw.start, raw.end)
    }
}

impl TimeRange {
    /// Build a range, rejecting `end < start`. Empty ranges are allowed.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidRange` when `end` precedes `start`. The
    /// bounds are never swapped or clamped.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end < start {
            return Err(SlotError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a range from two zoned instants, keeping each one's local
    /// wall-clock time.
    ///
    /// The instants are expected to be resolved in the business timezone
    /// already; no conversion happens here.
    pub fn from_zoned<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> Result<Self> {
        Self::new(start.naive_local(), end.naive_local())
    }

    /// Build the range `[start, start + minutes)`, or `None` if the end
    /// falls past the last representable instant.
    pub fn starting_at(start: NaiveDateTime, minutes: u32) -> Option<Self> {
        let end = start.checked_add_signed(TimeDelta::minutes(i64::from(minutes)))?;
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Ceiling-rounded length in minutes. See [`duration_minutes`].
    pub fn duration_minutes(&self) -> i64 {
        duration_minutes(self)
    }

    /// Closed containment. See [`range_contains`].
    pub fn contains(&self, inner: &TimeRange) -> bool {
        range_contains(self, inner)
    }
}

/// True iff `outer.start <= inner.start` and `outer.end >= inner.end`.
pub fn range_contains(outer: &TimeRange, inner: &TimeRange) -> bool {
    outer.start <= inner.start && outer.end >= inner.end
}

/// True iff at least one of `outers` contains `inner`. Empty `outers` is false.
pub fn any_range_contains(outers: &[TimeRange], inner: &TimeRange) -> bool {
    outers.iter().any(|outer| range_contains(outer, inner))
}

/// Length of `range` in minutes, rounded up.
///
/// A 1-minute-and-1-second range counts as 2 minutes, so available time is
/// never under-counted.
pub fn duration_minutes(range: &TimeRange) -> i64 {
    ceil_minutes(range.end - range.start)
}

/// Round a non-negative delta up to whole minutes.
pub(crate) fn ceil_minutes(delta: TimeDelta) -> i64 {
    // num_minutes truncates toward zero, which is a floor for delta >= 0.
    let whole = delta.num_minutes();
    if delta > TimeDelta::minutes(whole) {
        whole + 1
    } else {
        whole
    }
}
