//! Navigation state machine.
//!
//! The map is driven by a `(screen, step)` pair. Screens are the top-level
//! planning workflows; steps are the ordered stages within one screen.
//!
//! ```text
//! HomeScreen ──► ResourceMapping | Groundwater | SurfaceWater
//!      ▲               | Agriculture | Livelihood ──┐
//!      └──────────────────────────────────────────────┘   (cyclic)
//! ```
//!
//! State only changes through [`NavigationStateMachine::set_screen`] and
//! [`NavigationStateMachine::set_step`]. Changing screen resets the step to
//! zero and drops the current [`FeatureSelection`].

mod selection;
mod state;

pub use selection::{FeatureSelection, Panel};
pub use state::{NavigationError, NavigationState, NavigationStateMachine, Screen};
