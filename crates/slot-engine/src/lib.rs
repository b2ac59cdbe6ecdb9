//! # slot-engine
//!
//! Bookable time-slot computation for appointment booking.
//!
//! Given a weekly opening-hours schedule and an appointment duration, the
//! engine produces the concrete start times a customer may book, checks
//! whether an admin-chosen time falls inside working hours, and buckets
//! appointment times relative to "now" for list filtering.
//!
//! Every function is pure. Timezones are resolved by the caller: the engine
//! works on wall-clock instants in the business timezone and takes "now" as
//! an argument.
//!
//! ## Modules
//!
//! - [`schedule`] — `WeekSchedule`, `DaySchedule`, `OpeningHoursSlot`, `TimeOfDay`
//! - [`range`] — `TimeRange` construction, containment, ceiling-rounded length
//! - [`generator`] — one opening block → ordered slot start times
//! - [`aggregate`] — one day's blocks → one slot sequence per block
//! - [`validate`] — is a proposed appointment within working hours?
//! - [`period`] — past/day/week/month/year/all buckets
//! - [`calendar`] — multi-day listing with per-day selectability
//! - [`error`] — Error types
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use slot_engine::{generate_day_slots, OpeningHoursSlot, SlotOptions, TimeOfDay, WeekSchedule};
//!
//! let nine_to_five = OpeningHoursSlot::between(
//!     TimeOfDay::new(9, 0).unwrap(),
//!     TimeOfDay::new(17, 0).unwrap(),
//! )
//! .unwrap();
//! let week = WeekSchedule::uniform(&[nine_to_five]);
//! let monday = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
//!
//! let blocks = generate_day_slots(week.for_date(monday), monday, &SlotOptions::new(60)).unwrap();
//! assert_eq!(blocks.len(), 1);
//! assert_eq!(blocks[0].slots.len(), 8);
//! ```

pub mod aggregate;
pub mod calendar;
pub mod error;
pub mod generator;
pub mod period;
pub mod range;
pub mod schedule;
pub mod validate;

pub use aggregate::{flatten, generate_block_slots, generate_day_slots, BlockSlots};
pub use calendar::{list_calendar, month_calendar, CalendarDay};
pub use error::SlotError;
pub use generator::{generate_slots, generate_slots_with, Slot, SlotOptions};
pub use period::{applicable_periods, classify_period, Period};
pub use range::{any_range_contains, duration_minutes, range_contains, TimeRange};
pub use schedule::{Day, DaySchedule, OpeningHoursSlot, TimeOfDay, WeekSchedule};
pub use validate::is_within_working_hours;
