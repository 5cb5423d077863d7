//! Rendering surface seam.
//!
//! The map engine that draws layers and answers hit tests is external. The
//! orchestration code talks to it through two traits:
//!
//! - [`RenderSurface`]: the attached layer list and per-layer hit testing
//! - [`ViewController`]: camera moves (fit, animate, jump)
//!
//! [`InMemorySurface`] implements both without drawing anything. It backs
//! the headless CLI session and the tests.

mod memory;

pub use memory::{InMemorySurface, ViewCommand};

use std::time::Duration;

use crate::coord::{Extent, LonLat};
use crate::layer::{Feature, LayerHandle, LayerId};

/// The engine's layer list.
pub trait RenderSurface: Send + Sync {
    /// Attach a layer. Attaching an already attached instance is a no-op.
    fn attach(&self, layer: LayerHandle);

    /// Detach a layer instance. Returns `false` if it was not attached.
    fn detach(&self, id: LayerId) -> bool;

    /// Attached layers, bottom to top.
    fn layers(&self) -> Vec<LayerHandle>;

    fn contains(&self, id: LayerId) -> bool;

    /// Topmost rendered feature of one attached layer at a map coordinate.
    fn feature_at(&self, layer: LayerId, at: LonLat) -> Option<Feature>;
}

/// The engine's camera.
pub trait ViewController: Send + Sync {
    /// Fit the view to `extent`, leaving `padding` pixels on every side.
    fn fit_extent(&self, extent: Extent, padding: u32, duration: Duration);

    fn animate_to(&self, center: LonLat, zoom: f64, duration: Duration);

    /// Jump without animation.
    fn set_view(&self, center: LonLat, zoom: f64);
}
