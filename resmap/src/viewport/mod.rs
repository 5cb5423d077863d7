//! Camera choreography.
//!
//! Two kinds of animation run independently:
//!
//! - boundary: fit the admin boundary, zoom in close, fade the boundary and
//!   asset layers in
//! - location: fly to the user's position
//!
//! A new request of one kind cancels the pending animation of that kind,
//! which then reports [`AnimationOutcome::Superseded`].

mod animator;

pub use animator::{AnimationKind, AnimationOutcome, ViewportAnimator, ViewportConfig};
