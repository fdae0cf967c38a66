//! Narrowing slots down to one person.
//!
//! An unresolvable candidate id yields no slots at all: a filter that cannot
//! be applied must never fall back to showing everything.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{person::Candidate, slot::Slot};

/// Which person the visible slots are restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "filterType", content = "filterId", rename_all = "lowercase")]
pub enum PersonFilter {
    #[default]
    None,
    Candidate(String),
    Engineer(String),
}

impl PersonFilter {
    /// Whether this filter leaves its input untouched.
    pub fn is_identity(&self) -> bool {
        match self {
            PersonFilter::None => true,
            PersonFilter::Candidate(id) | PersonFilter::Engineer(id) => id.is_empty(),
        }
    }

    /// The candidate to pre-select in a booking form, if any.
    pub fn candidate_id(&self) -> Option<&str> {
        match self {
            PersonFilter::Candidate(id) if !id.is_empty() => Some(id),
            _ => None,
        }
    }
}

/// Applies `filter` to `slots`, preserving order.
pub fn filter_by_person(slots: &[Slot], filter: &PersonFilter, candidates: &[Candidate]) -> Vec<Slot> {
    if filter.is_identity() {
        return slots.to_vec();
    }

    match filter {
        PersonFilter::Candidate(id) => {
            let Some(candidate) = candidates.iter().find(|c| &c.id == id) else {
                debug!(candidate_id = %id, "Unknown candidate in filter, no slots match");
                return Vec::new();
            };

            slots
                .iter()
                .filter(|slot| {
                    candidate
                        .availability
                        .iter()
                        .any(|window| window.contains(slot.start, slot.end))
                })
                .cloned()
                .collect()
        }
        PersonFilter::Engineer(id) => slots
            .iter()
            .filter(|slot| &slot.engineer_id == id)
            .cloned()
            .collect(),
        PersonFilter::None => slots.to_vec(),
    }
}
