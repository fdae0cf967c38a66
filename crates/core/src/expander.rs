//! Expansion of engineer availability windows into fixed 15-minute slots.
//!
//! Each window is walked from its start in [`SLOT_MINUTES`] steps. A slot is
//! emitted only while it ends at or before the window end; any trailing
//! remainder shorter than one slot is dropped rather than truncated.
//!
//! Slot ids are unique across the expanded set. When windows of the same
//! engineer overlap, the first slot generated for an id wins.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::models::{
    person::{AvailabilityWindow, Engineer},
    slot::{Slot, SlotStatus, SLOT_MINUTES, slot_length},
};

/// Expands every window of every engineer, in input order.
///
/// Windows whose end is not after their start are skipped with a warning.
/// Slots repeating an id already emitted are dropped.
pub fn expand_engineers(engineers: &[Engineer]) -> Vec<Slot> {
    let mut seen = HashSet::new();
    let mut duplicates = 0usize;
    let slots: Vec<Slot> = engineers
        .iter()
        .flat_map(|engineer| {
            engineer
                .availability
                .iter()
                .flat_map(move |window| expand_window(engineer, window))
        })
        .filter(|slot| {
            let fresh = seen.insert(slot.id.clone());
            if !fresh {
                duplicates += 1;
            }
            fresh
        })
        .collect();

    if duplicates > 0 {
        warn!(duplicates, "Dropped slots from overlapping availability windows");
    }
    debug!(
        engineers = engineers.len(),
        slots = slots.len(),
        "Expanded engineer availability into {}-minute slots",
        SLOT_MINUTES
    );

    slots
}

/// Expands a single window of `engineer` into slots.
pub fn expand_window(engineer: &Engineer, window: &AvailabilityWindow) -> Vec<Slot> {
    if !window.is_valid() {
        warn!(
            engineer_id = %engineer.id,
            window_id = %window.id,
            start = %window.start,
            end = %window.end,
            "Skipping availability window that does not end after it starts"
        );
        return Vec::new();
    }

    let step = slot_length();
    let title = Slot::free_title(&engineer.full_name());
    let mut slots = Vec::new();
    let mut start = window.start;

    while let Some(end) = start.checked_add_signed(step) {
        if end > window.end {
            break;
        }
        slots.push(Slot {
            id: Slot::make_id(&engineer.id, start),
            start,
            end,
            title: title.clone(),
            engineer_id: engineer.id.clone(),
            color: engineer.color.clone(),
            status: SlotStatus::Available,
            candidate_id: None,
        });
        start = end;
    }

    slots
}
