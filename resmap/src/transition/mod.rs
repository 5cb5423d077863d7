//! Working-set transitions.
//!
//! [`TransitionController`] turns a navigation state into the set of
//! attached layers, using the static table in [`working_set`]. Missing
//! slots are created through a [`LayerFactory`](crate::source::LayerFactory);
//! cached ones are reused.

mod controller;
mod table;

pub use controller::{
    RefreshReport, TransitionController, TransitionKind, TransitionOutcome, TransitionReport,
};
pub use table::{rank_in, visible_keys, working_set, SlotEntry, RETAINED};
