//! Session state for one scheduling view.
//!
//! A [`SlotBoard`] holds the loaded reference data, the slots expanded from
//! it, the active person filter and duration, and the current selection.
//! The visible slot list is derived state: it is recomputed whenever the
//! slots, the filter or the duration change, and only then.
//!
//! Booking is split in two phases. [`SlotBoard::begin_booking`] marks the
//! slot pending immediately so it disappears from the free set, and
//! [`SlotBoard::settle_booking`] either confirms it or restores it once the
//! remote acknowledgement (or its failure) is known.

use std::collections::HashMap;

use eyre::Report;
use tracing::{info, warn};

use crate::{
    errors::{SlotError, SlotResult},
    expander::expand_engineers,
    filter::{PersonFilter, filter_by_person},
    grouper::{BlockDuration, group_by_duration},
    models::{
        booking::{BookingAck, BookingRequest, BookingResponse, LoadStatus, Selection, StatusResponse},
        person::{Candidate, Engineer},
        slot::{BOOKED_COLOR, BOOKED_TITLE, Slot, SlotStatus},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Handle for a booking whose local half has been applied.
///
/// Carries what is needed to undo the optimistic change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBooking {
    pub request: BookingRequest,
    previous_title: String,
    previous_color: String,
}

#[derive(Debug)]
pub struct SlotBoard {
    state: LoadState,
    candidates: Vec<Candidate>,
    engineers: Vec<Engineer>,
    slots: Vec<Slot>,
    filter: PersonFilter,
    duration: BlockDuration,
    visible: Vec<Slot>,
    selection: Option<Selection>,
}

impl Default for SlotBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotBoard {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            candidates: Vec::new(),
            engineers: Vec::new(),
            slots: Vec::new(),
            filter: PersonFilter::None,
            duration: BlockDuration::SINGLE,
            visible: Vec::new(),
            selection: None,
        }
    }

    /// Marks the board as waiting for a fresh load.
    pub fn begin_loading(&mut self) {
        self.state = LoadState::Loading;
    }

    /// Installs freshly fetched data and regenerates every slot.
    ///
    /// Slots that were pending or booked before the reload keep their
    /// booking when they are regenerated under the same id.
    pub fn load(&mut self, candidates: Vec<Candidate>, engineers: Vec<Engineer>) {
        let mut slots = expand_engineers(&engineers);
        let carried = self.carry_bookings(&mut slots);
        self.slots = slots;
        self.candidates = candidates;
        self.engineers = engineers;
        self.selection = None;
        self.state = LoadState::Ready;
        self.refresh();

        info!(
            candidates = self.candidates.len(),
            engineers = self.engineers.len(),
            slots = self.slots.len(),
            carried,
            "Slot board loaded"
        );
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(%reason, "Slot board failed to load");
        self.state = LoadState::Failed(reason);
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn status(&self) -> StatusResponse {
        let (status, error) = match &self.state {
            LoadState::Loading => (LoadStatus::Loading, None),
            LoadState::Ready => (LoadStatus::Ready, None),
            LoadState::Failed(reason) => (LoadStatus::Failed, Some(reason.clone())),
        };
        StatusResponse {
            status,
            error,
            slot_count: self.slots.len(),
        }
    }

    pub fn ensure_ready(&self) -> SlotResult<()> {
        match &self.state {
            LoadState::Ready => Ok(()),
            LoadState::Loading => Err(SlotError::NotReady(
                "Candidates and engineers are still loading".to_string(),
            )),
            LoadState::Failed(reason) => Err(SlotError::LoadFailed(reason.clone())),
        }
    }

    pub fn candidates(&self) -> SlotResult<&[Candidate]> {
        self.ensure_ready()?;
        Ok(&self.candidates)
    }

    pub fn engineers(&self) -> SlotResult<&[Engineer]> {
        self.ensure_ready()?;
        Ok(&self.engineers)
    }

    pub fn filter(&self) -> &PersonFilter {
        &self.filter
    }

    pub fn duration(&self) -> BlockDuration {
        self.duration
    }

    pub fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    /// Every generated slot, regardless of the active view.
    pub fn all_slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The slots matching the active filter and duration.
    pub fn visible_slots(&self) -> SlotResult<&[Slot]> {
        self.ensure_ready()?;
        Ok(&self.visible)
    }

    /// Changes the active view. Returns whether anything was recomputed.
    pub fn set_view(&mut self, filter: PersonFilter, duration: BlockDuration) -> bool {
        if self.filter == filter && self.duration == duration {
            return false;
        }
        self.filter = filter;
        self.duration = duration;
        self.refresh();
        true
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Opens a selection on `slot_id`.
    ///
    /// Slots that are pending or booked cannot be selected; the current
    /// selection is left untouched in that case.
    pub fn select_slot(&mut self, slot_id: &str) -> SlotResult<Selection> {
        self.ensure_ready()?;
        let slot = self
            .slot(slot_id)
            .ok_or_else(|| SlotError::NotFound(format!("Slot {} not found", slot_id)))?;

        if !slot.is_available() {
            return Err(SlotError::Conflict(format!("Slot {} is already booked", slot_id)));
        }

        let selection = Selection {
            initial_candidate_id: self.filter.candidate_id().map(str::to_string),
            initial_engineer_id: slot.engineer_id.clone(),
            slot: slot.clone(),
        };
        self.selection = Some(selection.clone());
        Ok(selection)
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Applies the local half of a booking.
    ///
    /// The slot becomes pending, carries the candidate and is shown as
    /// booked. The selection is cleared.
    pub fn begin_booking(&mut self, request: BookingRequest) -> SlotResult<PendingBooking> {
        self.ensure_ready()?;

        if !self.candidates.iter().any(|c| c.id == request.candidate_id) {
            return Err(SlotError::NotFound(format!(
                "Candidate {} not found",
                request.candidate_id
            )));
        }
        if !self.engineers.iter().any(|e| e.id == request.engineer_id) {
            return Err(SlotError::NotFound(format!(
                "Engineer {} not found",
                request.engineer_id
            )));
        }

        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.id == request.slot_id)
            .ok_or_else(|| SlotError::NotFound(format!("Slot {} not found", request.slot_id)))?;

        if slot.engineer_id != request.engineer_id {
            return Err(SlotError::Validation(format!(
                "Slot {} belongs to engineer {}, not {}",
                slot.id, slot.engineer_id, request.engineer_id
            )));
        }
        if !slot.is_available() {
            return Err(SlotError::Conflict(format!("Slot {} is already booked", slot.id)));
        }

        let pending = PendingBooking {
            previous_title: std::mem::replace(&mut slot.title, BOOKED_TITLE.to_string()),
            previous_color: std::mem::replace(&mut slot.color, BOOKED_COLOR.to_string()),
            request,
        };
        slot.status = SlotStatus::Pending;
        slot.candidate_id = Some(pending.request.candidate_id.clone());

        info!(
            slot_id = %pending.request.slot_id,
            candidate_id = %pending.request.candidate_id,
            "Booking pending confirmation"
        );

        self.selection = None;
        self.refresh();
        Ok(pending)
    }

    /// Applies the outcome of the remote confirmation to a pending booking.
    ///
    /// On failure the slot is restored to available and the remote error is
    /// returned.
    pub fn settle_booking(
        &mut self,
        pending: PendingBooking,
        outcome: Result<BookingAck, Report>,
    ) -> SlotResult<BookingResponse> {
        match outcome {
            Ok(ack) => {
                let slot = self.confirm_booking(&pending)?;
                Ok(BookingResponse { slot, ack })
            }
            Err(err) => {
                warn!(
                    slot_id = %pending.request.slot_id,
                    error = %err,
                    "Booking confirmation failed, reverting"
                );
                self.revert_booking(&pending)?;
                Err(SlotError::Remote(err))
            }
        }
    }

    fn confirm_booking(&mut self, pending: &PendingBooking) -> SlotResult<Slot> {
        let slot = self.pending_slot_mut(pending)?;
        slot.status = SlotStatus::Booked;
        let slot = slot.clone();

        info!(slot_id = %slot.id, "Booking confirmed");
        self.refresh();
        Ok(slot)
    }

    fn revert_booking(&mut self, pending: &PendingBooking) -> SlotResult<()> {
        let slot = self.pending_slot_mut(pending)?;
        slot.status = SlotStatus::Available;
        slot.candidate_id = None;
        slot.title = pending.previous_title.clone();
        slot.color = pending.previous_color.clone();

        self.refresh();
        Ok(())
    }

    // A reload while the remote call is in flight carries the pending slot
    // over; only a slot still pending for the same candidate is touched.
    fn pending_slot_mut(&mut self, pending: &PendingBooking) -> SlotResult<&mut Slot> {
        let request = &pending.request;
        self.slots
            .iter_mut()
            .find(|slot| {
                slot.id == request.slot_id
                    && slot.status == SlotStatus::Pending
                    && slot.candidate_id.as_deref() == Some(request.candidate_id.as_str())
            })
            .ok_or_else(|| {
                SlotError::Conflict(format!(
                    "Slot {} changed while its booking was in flight",
                    request.slot_id
                ))
            })
    }

    fn carry_bookings(&self, slots: &mut [Slot]) -> usize {
        let held: HashMap<&str, &Slot> = self
            .slots
            .iter()
            .filter(|slot| !slot.is_available())
            .map(|slot| (slot.id.as_str(), slot))
            .collect();
        if held.is_empty() {
            return 0;
        }

        let mut carried = 0;
        for slot in slots.iter_mut() {
            if let Some(previous) = held.get(slot.id.as_str()) {
                slot.status = previous.status;
                slot.candidate_id = previous.candidate_id.clone();
                slot.title = previous.title.clone();
                slot.color = previous.color.clone();
                carried += 1;
            }
        }
        if carried < held.len() {
            warn!(
                dropped = held.len() - carried,
                "Booked slots no longer present in the reloaded availability"
            );
        }
        carried
    }

    fn refresh(&mut self) {
        let by_person = filter_by_person(&self.slots, &self.filter, &self.candidates);
        self.visible = group_by_duration(&by_person, self.duration);
    }
}
