//! Relative-time buckets for filtering appointment lists.
//!
//! An appointment is placed in exactly one [`Period`] by the seconds between
//! now and its start. Bands are half-open: `[lower, upper)`. A month is
//! 30 days and a year 365 days; calendar months are not considered.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::SlotError;

const DAY_SECS: i64 = 86_400;
const WEEK_SECS: i64 = 7 * DAY_SECS;
const MONTH_SECS: i64 = 30 * DAY_SECS;
const YEAR_SECS: i64 = 365 * DAY_SECS;

/// A relative-time bucket. Ordered from nearest to farthest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Past,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::Past,
        Period::Day,
        Period::Week,
        Period::Month,
        Period::Year,
        Period::All,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Period::Past => "past",
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }

    /// Bucket for a signed distance from now, in seconds.
    pub fn from_delta_seconds(delta: i64) -> Period {
        match delta {
            d if d <= 0 => Period::Past,
            d if d < DAY_SECS => Period::Day,
            d if d < WEEK_SECS => Period::Week,
            d if d < MONTH_SECS => Period::Month,
            d if d < YEAR_SECS => Period::Year,
            _ => Period::All,
        }
    }

    /// Whether a list filtered by `self` shows this appointment.
    ///
    /// Forward filters are inclusive of nearer buckets: `week` also shows
    /// appointments due within the day. `past` only shows past ones.
    pub fn matches<A: TimeZone, B: TimeZone>(
        &self,
        appointment: &DateTime<A>,
        now: &DateTime<B>,
    ) -> bool {
        applicable_periods(appointment, now).contains(self)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Period {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Period::ALL
            .into_iter()
            .find(|p| p.name() == lower)
            .ok_or_else(|| SlotError::Parse(format!("unknown period '{}'", s)))
    }
}

/// Classify `appointment` relative to `now` into exactly one bucket.
pub fn classify_period<A: TimeZone, B: TimeZone>(
    appointment: &DateTime<A>,
    now: &DateTime<B>,
) -> Period {
    Period::from_delta_seconds(appointment.timestamp() - now.timestamp())
}

/// Every bucket whose filter should include `appointment`.
///
/// `past` maps to `{past}` alone. Any forward bucket maps to itself plus
/// every farther forward bucket.
pub fn applicable_periods<A: TimeZone, B: TimeZone>(
    appointment: &DateTime<A>,
    now: &DateTime<B>,
) -> BTreeSet<Period> {
    match classify_period(appointment, now) {
        Period::Past => BTreeSet::from([Period::Past]),
        nearest => Period::ALL.into_iter().filter(|p| *p >= nearest).collect(),
    }
}
