//! Selecting slots that can start a meeting of a given length.
//!
//! A slot anchors a block when it and the following `duration / 15 - 1`
//! slots of the same engineer are all available and back to back. Lookups
//! are keyed by `(engineer_id, start)` so two engineers whose slots happen to
//! touch are never joined into one block.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{SlotError, SlotResult},
    models::slot::{SLOT_MINUTES, Slot, slot_length},
};

/// A requested meeting length: a positive multiple of [`SLOT_MINUTES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BlockDuration(u32);

impl BlockDuration {
    /// The base unit, one slot long.
    pub const SINGLE: BlockDuration = BlockDuration(SLOT_MINUTES as u32);

    pub fn new(minutes: u32) -> SlotResult<Self> {
        if minutes == 0 || minutes % SLOT_MINUTES as u32 != 0 {
            return Err(SlotError::Validation(format!(
                "Duration must be a positive multiple of {} minutes, got {}",
                SLOT_MINUTES, minutes
            )));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    /// Number of consecutive slots a block of this length spans.
    pub fn block_size(self) -> u32 {
        self.0 / SLOT_MINUTES as u32
    }
}

impl Default for BlockDuration {
    fn default() -> Self {
        Self::SINGLE
    }
}

impl TryFrom<u32> for BlockDuration {
    type Error = SlotError;

    fn try_from(minutes: u32) -> SlotResult<Self> {
        Self::new(minutes)
    }
}

impl From<BlockDuration> for u32 {
    fn from(duration: BlockDuration) -> Self {
        duration.0
    }
}

impl fmt::Display for BlockDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutes", self.0)
    }
}

/// Keeps only the slots that anchor a full block of `duration`.
///
/// With the base duration every slot qualifies and the input is returned as
/// is, booked slots included. For longer durations only available slots can
/// anchor or extend a block.
pub fn group_by_duration(slots: &[Slot], duration: BlockDuration) -> Vec<Slot> {
    if duration == BlockDuration::SINGLE {
        return slots.to_vec();
    }

    let free: HashSet<(&str, DateTime<Utc>)> = slots
        .iter()
        .filter(|slot| slot.is_available())
        .map(|slot| (slot.engineer_id.as_str(), slot.start))
        .collect();

    let step = slot_length();
    let mut anchored: HashSet<(String, DateTime<Utc>)> = HashSet::new();

    slots
        .iter()
        .filter(|slot| slot.is_available())
        .filter(|slot| {
            (1..duration.block_size()).all(|i| {
                step.checked_mul(i as i32)
                    .and_then(|offset| slot.start.checked_add_signed(offset))
                    .is_some_and(|next| free.contains(&(slot.engineer_id.as_str(), next)))
            })
        })
        .filter(|slot| anchored.insert((slot.engineer_id.clone(), slot.start)))
        .cloned()
        .collect()
}
