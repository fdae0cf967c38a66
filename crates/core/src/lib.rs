//! # SlotBook Core
//!
//! Domain models and the pure slot computations behind the interview
//! scheduling service.
//!
//! Slots flow through three stages before they reach a client:
//!
//! - [`expander`] turns engineer availability windows into 15-minute slots
//! - [`filter`] narrows them to one candidate or engineer
//! - [`grouper`] keeps the anchors of contiguous blocks of a given duration
//!
//! [`board`] owns the session state (loaded data, active view, selection)
//! and drives the two-phase booking flow.

pub mod board;
pub mod errors;
pub mod expander;
pub mod filter;
pub mod grouper;
pub mod models;
