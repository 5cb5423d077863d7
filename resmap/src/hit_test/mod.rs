//! Click resolution against the attached layers.
//!
//! A click is tested against a per-screen priority list of slots, topmost
//! first. The first slot whose layer is cached, attached and has a feature
//! under the pointer wins; the slot's [`FeatureHandler`] turns the hit into
//! a [`FeatureSelection`](crate::navigation::FeatureSelection) and may
//! restyle the layer.

mod dispatcher;
mod handler;
mod priority;

pub use dispatcher::{HitResult, HitTestDispatcher};
pub use handler::{
    AssetHandler, FeatureHandler, HandlerRegistry, HandlerResult, WellDepthHandler,
};
pub use priority::priority;
