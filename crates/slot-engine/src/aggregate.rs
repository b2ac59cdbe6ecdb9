//! Per-day aggregation: run the generator over every opening block of a day.
//!
//! Results stay grouped by block. A day picker needs to know which block a
//! slot came from; callers wanting one list flatten explicitly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::generator::{generate_slots_with, Slot, SlotOptions};
use crate::range::TimeRange;
use crate::schedule::DaySchedule;

/// The slots generated for one opening block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSlots {
    /// The resolved opening block.
    pub range: TimeRange,
    /// Bookable start times inside `range`, ascending.
    pub slots: Vec<Slot>,
}

/// Generate slots for each of `ranges`, preserving order.
pub fn generate_block_slots(
    ranges: &[TimeRange],
    options: &SlotOptions,
) -> Result<Vec<BlockSlots>> {
    options.validate()?;
    ranges
        .iter()
        .map(|range| -> Result<BlockSlots> {
            Ok(BlockSlots {
                range: *range,
                slots: generate_slots_with(range, options)?,
            })
        })
        .collect()
}

/// Generate slots for every opening block `schedule` defines on `date`.
///
/// A disabled day yields an empty list. An all-day day is a single
/// 00:00–24:00 block. Blocks with an unset bound are skipped.
///
/// # Errors
/// Returns `SlotError::InvalidDuration` for a zero duration, even on a
/// disabled day.
pub fn generate_day_slots(
    schedule: &DaySchedule,
    date: NaiveDate,
    options: &SlotOptions,
) -> Result<Vec<BlockSlots>> {
    generate_block_slots(&schedule.opening_ranges(date), options)
}

/// Concatenate per-block sequences into one list, in block order.
pub fn flatten(blocks: &[BlockSlots]) -> Vec<Slot> {
    blocks.iter().flat_map(|b| b.slots.iter().copied()).collect()
}
