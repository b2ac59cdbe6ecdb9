//! Weekly opening-hours model.
//!
//! A [`WeekSchedule`] holds exactly one [`DaySchedule`] per weekday. Each day
//! is either disabled, open all day, or open during an ordered list of
//! [`OpeningHoursSlot`]s. Slots may be partially configured (an unset start
//! or end); such slots are carried as-is and skipped when ranges are
//! resolved, so a half-edited day is never an error.
//!
//! All types are immutable values. Builders return new values instead of
//! mutating in place.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SlotError};
use crate::range::TimeRange;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Midnight (00:00) at the start of `date`.
pub(crate) fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

// ── TimeOfDay ───────────────────────────────────────────────────────────────

/// A wall-clock time of day with minute precision (`00:00`..=`23:59`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    /// # Errors
    /// Returns `SlotError::InvalidTimeOfDay` unless `hour < 24` and `minute < 60`.
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(SlotError::InvalidTimeOfDay { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// This time of day on `date`.
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.as_naive_time())
    }

    fn as_naive_time(&self) -> NaiveTime {
        // Wrapping add; the offset is always under a day.
        NaiveTime::MIN + TimeDelta::minutes(i64::from(self.minutes_from_midnight()))
    }

    /// Every time of day from 00:00, stepping by `precision_minutes`, that
    /// stays within the same day. Feeds the admin time picker.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidPrecision` when `precision_minutes` is 0 or
    /// longer than a day.
    pub fn picker_options(precision_minutes: u32) -> Result<Vec<TimeOfDay>> {
        if precision_minutes == 0 || precision_minutes > MINUTES_PER_DAY {
            return Err(SlotError::InvalidPrecision(precision_minutes));
        }
        Ok((0..MINUTES_PER_DAY)
            .step_by(precision_minutes as usize)
            .map(|m| TimeOfDay {
                hour: m / 60,
                minute: m % 60,
            })
            .collect())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    /// Parses `H:MM` or `HH:MM`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SlotError::Parse(format!("cannot parse time of day '{}'", s));
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        TimeOfDay::new(hour, minute)
    }
}

/// Hour and minute travel as two-digit strings but may arrive as integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum Component {
    Number(u32),
    Text(String),
}

impl Component {
    fn value(&self) -> std::result::Result<u32, String> {
        match self {
            Component::Number(n) => Ok(*n),
            Component::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| format!("expected a number, got '{}'", s)),
        }
    }
}

#[derive(Deserialize)]
struct RawTimeOfDay {
    hour: Component,
    minute: Component,
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("TimeOfDay", 2)?;
        state.serialize_field("hour", &format!("{:02}", self.hour))?;
        state.serialize_field("minute", &format!("{:02}", self.minute))?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        use serde::de::Error;
        let raw = RawTimeOfDay::deserialize(deserializer)?;
        let hour = raw.hour.value().map_err(D::Error::custom)?;
        let minute = raw.minute.value().map_err(D::Error::custom)?;
        TimeOfDay::new(hour, minute).map_err(D::Error::custom)
    }
}

// ── OpeningHoursSlot ────────────────────────────────────────────────────────

/// One opening-hours block within a day. Either bound may be unset while the
/// block is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSlot")]
pub struct OpeningHoursSlot {
    start: Option<TimeOfDay>,
    end: Option<TimeOfDay>,
}

#[derive(Deserialize)]
struct RawSlot {
    #[serde(default)]
    start: Option<TimeOfDay>,
    #[serde(default)]
    end: Option<TimeOfDay>,
}

impl TryFrom<RawSlot> for OpeningHoursSlot {
    type Error = SlotError;

    fn try_from(raw: RawSlot) -> Result<Self> {
        OpeningHoursSlot::new(raw.start, raw.end)
    }
}

impl OpeningHoursSlot {
    /// # Errors
    /// Returns `SlotError::InvalidSlot` when both bounds are set and `start`
    /// is not strictly before `end`. Blocks never span midnight.
    pub fn new(start: Option<TimeOfDay>, end: Option<TimeOfDay>) -> Result<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s >= e {
                return Err(SlotError::InvalidSlot(format!(
                    "start {} must be before end {}",
                    s, e
                )));
            }
        }
        Ok(Self { start, end })
    }

    /// A fully configured block.
    pub fn between(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        Self::new(Some(start), Some(end))
    }

    /// A block with neither bound configured yet.
    pub fn unset() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    pub fn start(&self) -> Option<TimeOfDay> {
        self.start
    }

    pub fn end(&self) -> Option<TimeOfDay> {
        self.end
    }

    pub fn is_configured(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// This block as an absolute range on `date`, or `None` if unset.
    pub fn resolve(&self, date: NaiveDate) -> Option<TimeRange> {
        let (start, end) = (self.start?, self.end?);
        TimeRange::starting_at(
            start.on(date),
            end.minutes_from_midnight() - start.minutes_from_midnight(),
        )
    }
}

// ── Day ─────────────────────────────────────────────────────────────────────

/// A weekday, serialized as its lowercase English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// All seven days, Monday first.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    /// The weekday `date` falls on.
    pub fn of(date: NaiveDate) -> Day {
        Day::from(date.weekday())
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        Day::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Day::ALL
            .into_iter()
            .find(|d| d.name() == lower)
            .ok_or_else(|| SlotError::Parse(format!("unknown weekday '{}'", s)))
    }
}

// ── DaySchedule ─────────────────────────────────────────────────────────────

/// Opening hours for one weekday.
///
/// `enabled == false` means no availability regardless of `slots`. `all_day`
/// overrides `slots` with a single 00:00–24:00 range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub day: Day,
    pub enabled: bool,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub slots: Vec<OpeningHoursSlot>,
}

impl DaySchedule {
    pub fn open(day: Day, slots: Vec<OpeningHoursSlot>) -> Self {
        Self {
            day,
            enabled: true,
            all_day: false,
            slots,
        }
    }

    pub fn closed(day: Day) -> Self {
        Self {
            day,
            enabled: false,
            all_day: false,
            slots: Vec::new(),
        }
    }

    pub fn all_day(day: Day) -> Self {
        Self {
            day,
            enabled: true,
            all_day: true,
            slots: Vec::new(),
        }
    }

    /// The raw opening ranges for `date`, in block order.
    ///
    /// Disabled days yield nothing; all-day days yield `[00:00, next 00:00)`;
    /// otherwise each configured block is resolved and unset blocks are
    /// skipped. A range whose end is not representable (past
    /// `NaiveDate::MAX`) is skipped as well.
    pub fn opening_ranges(&self, date: NaiveDate) -> Vec<TimeRange> {
        if !self.enabled {
            return Vec::new();
        }
        if self.all_day {
            return TimeRange::starting_at(midnight(date), MINUTES_PER_DAY)
                .into_iter()
                .collect();
        }
        self.slots.iter().filter_map(|slot| slot.resolve(date)).collect()
    }
}

// ── WeekSchedule ────────────────────────────────────────────────────────────

/// Exactly one [`DaySchedule`] for each weekday.
///
/// On the wire this is a JSON object keyed by lowercase day name. A missing
/// or repeated day, or a `day` field disagreeing with its key, fails
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "BTreeMap<Day, DaySchedule>")]
pub struct WeekSchedule {
    days: [DaySchedule; 7],
}

impl WeekSchedule {
    /// # Errors
    /// Returns `SlotError::InvalidSlot` unless `days` is Monday..Sunday in order.
    pub fn new(days: [DaySchedule; 7]) -> Result<Self> {
        for (expected, schedule) in Day::ALL.iter().zip(days.iter()) {
            if schedule.day != *expected {
                return Err(SlotError::InvalidSlot(format!(
                    "expected {} schedule, found {}",
                    expected, schedule.day
                )));
            }
        }
        Ok(Self { days })
    }

    /// Every day disabled.
    pub fn closed() -> Self {
        Self {
            days: Day::ALL.map(DaySchedule::closed),
        }
    }

    /// Every day enabled with the same blocks.
    pub fn uniform(slots: &[OpeningHoursSlot]) -> Self {
        Self {
            days: Day::ALL.map(|day| DaySchedule::open(day, slots.to_vec())),
        }
    }

    /// A copy of this schedule with `schedule` replacing its weekday.
    pub fn with_day(&self, schedule: DaySchedule) -> Self {
        let mut days = self.days.clone();
        let index = schedule.day.index();
        days[index] = schedule;
        Self { days }
    }

    pub fn day(&self, day: Day) -> &DaySchedule {
        &self.days[day.index()]
    }

    /// The schedule governing `date`.
    pub fn for_date(&self, date: NaiveDate) -> &DaySchedule {
        self.day(Day::of(date))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DaySchedule> {
        self.days.iter()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

struct WeekScheduleVisitor;

impl<'de> Visitor<'de> for WeekScheduleVisitor {
    type Value = WeekSchedule;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from weekday name to day schedule")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<WeekSchedule, A::Error>
    where
        A: MapAccess<'de>,
    {
        use serde::de::Error;
        let mut seen: [Option<DaySchedule>; 7] = Default::default();
        while let Some(day) = map.next_key::<Day>()? {
            if seen[day.index()].is_some() {
                return Err(A::Error::custom(format!("duplicate schedule for {}", day)));
            }
            let schedule: DaySchedule = map.next_value()?;
            if schedule.day != day {
                return Err(A::Error::custom(format!(
                    "schedule under key {} is for {}",
                    day, schedule.day
                )));
            }
            seen[day.index()] = Some(schedule);
        }

        let mut days = Vec::with_capacity(7);
        for (day, schedule) in Day::ALL.into_iter().zip(seen) {
            let schedule = schedule
                .ok_or_else(|| A::Error::custom(format!("missing schedule for {}", day)))?;
            days.push(schedule);
        }
        let days: [DaySchedule; 7] = days
            .try_into()
            .map_err(|_| A::Error::custom("expected seven day schedules"))?;
        Ok(WeekSchedule { days })
    }
}

impl<'de> Deserialize<'de> for WeekSchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(WeekScheduleVisitor)
    }
}

impl From<WeekSchedule> for BTreeMap<Day, DaySchedule> {
    fn from(week: WeekSchedule) -> Self {
        week.days.into_iter().map(|d| (d.day, d)).collect()
    }
}
