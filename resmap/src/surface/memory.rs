//! Headless surface.

use std::time::Duration;

use parking_lot::Mutex;
use tracing::trace;

use super::{RenderSurface, ViewController};
use crate::coord::{Extent, LonLat};
use crate::layer::{Feature, LayerHandle, LayerId};
use crate::style::DEFAULT_CLICK_TOLERANCE;

/// A recorded camera call.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    Fit {
        extent: Extent,
        padding: u32,
        duration: Duration,
    },
    AnimateTo {
        center: LonLat,
        zoom: f64,
        duration: Duration,
    },
    SetView {
        center: LonLat,
        zoom: f64,
    },
}

/// Surface that keeps the layer list in memory and hit-tests geometry.
///
/// Within one layer the last matching feature is the topmost one, matching
/// draw order. Features whose resolved style is hidden are not hit.
#[derive(Debug)]
pub struct InMemorySurface {
    layers: Mutex<Vec<LayerHandle>>,
    views: Mutex<Vec<ViewCommand>>,
    tolerance: f64,
}

impl Default for InMemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self {
            layers: Mutex::new(Vec::new()),
            views: Mutex::new(Vec::new()),
            tolerance: DEFAULT_CLICK_TOLERANCE,
        }
    }

    /// Set the hit tolerance in degrees.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Camera calls received so far, oldest first.
    pub fn view_commands(&self) -> Vec<ViewCommand> {
        self.views.lock().clone()
    }

    pub fn last_view(&self) -> Option<ViewCommand> {
        self.views.lock().last().cloned()
    }

    fn record(&self, command: ViewCommand) {
        trace!(command = ?command, "View command");
        self.views.lock().push(command);
    }
}

impl RenderSurface for InMemorySurface {
    fn attach(&self, layer: LayerHandle) {
        let mut layers = self.layers.lock();
        if layers.iter().any(|l| l.id() == layer.id()) {
            return;
        }
        layers.push(layer);
    }

    fn detach(&self, id: LayerId) -> bool {
        let mut layers = self.layers.lock();
        let before = layers.len();
        layers.retain(|l| l.id() != id);
        layers.len() != before
    }

    fn layers(&self) -> Vec<LayerHandle> {
        let mut layers = self.layers.lock().clone();
        // Stable: equal ranks keep attach order.
        layers.sort_by_key(|l| l.z_rank());
        layers
    }

    fn contains(&self, id: LayerId) -> bool {
        self.layers.lock().iter().any(|l| l.id() == id)
    }

    fn feature_at(&self, layer: LayerId, at: LonLat) -> Option<Feature> {
        let handle = self
            .layers
            .lock()
            .iter()
            .find(|l| l.id() == layer)
            .cloned()?;
        if !handle.visible() {
            return None;
        }

        let style = handle.style();
        handle
            .features()
            .iter()
            .rev()
            .find(|f| f.hit(at, self.tolerance) && style.resolve(f).visible)
            .cloned()
    }
}

impl ViewController for InMemorySurface {
    fn fit_extent(&self, extent: Extent, padding: u32, duration: Duration) {
        self.record(ViewCommand::Fit {
            extent,
            padding,
            duration,
        });
    }

    fn animate_to(&self, center: LonLat, zoom: f64, duration: Duration) {
        self.record(ViewCommand::AnimateTo {
            center,
            zoom,
            duration,
        });
    }

    fn set_view(&self, center: LonLat, zoom: f64) {
        self.record(ViewCommand::SetView { center, zoom });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{Geometry, Layer, LayerKind, Properties, SlotKey};
    use crate::load::LoadStateCell;
    use crate::source::SourceDescriptor;
    use crate::style::{Style, StyleDescriptor};
    use serde_json::json;
    use std::sync::Arc;

    fn layer(key: SlotKey, z: i32) -> LayerHandle {
        let layer = Layer::new(
            key,
            key.kind(),
            SourceDescriptor::Local,
            Style::default(),
            LoadStateCell::new(),
        );
        layer.set_z_rank(z);
        Arc::new(layer)
    }

    fn named_point(name: &str, at: LonLat) -> Feature {
        let mut props = Properties::new();
        props.insert("name".into(), json!(name));
        Feature::new(Some(Geometry::point(at)), props)
    }

    #[test]
    fn test_attach_is_idempotent() {
        let surface = InMemorySurface::new();
        let l = layer(SlotKey::Settlement, 50);
        surface.attach(Arc::clone(&l));
        surface.attach(Arc::clone(&l));
        assert_eq!(surface.layers().len(), 1);
        assert!(surface.contains(l.id()));
    }

    #[test]
    fn test_layers_sorted_by_z_rank() {
        let surface = InMemorySurface::new();
        surface.attach(layer(SlotKey::Well, 51));
        surface.attach(layer(SlotKey::BaseImagery, 0));
        surface.attach(layer(SlotKey::AdminBoundary, 40));

        let keys: Vec<_> = surface.layers().iter().map(|l| l.key()).collect();
        assert_eq!(
            keys,
            vec![SlotKey::BaseImagery, SlotKey::AdminBoundary, SlotKey::Well]
        );
    }

    #[test]
    fn test_detach_reports_membership() {
        let surface = InMemorySurface::new();
        let l = layer(SlotKey::Well, 51);
        surface.attach(Arc::clone(&l));
        assert!(surface.detach(l.id()));
        assert!(!surface.detach(l.id()));
        assert!(surface.layers().is_empty());
    }

    #[test]
    fn test_feature_at_returns_topmost_match() {
        let surface = InMemorySurface::new();
        let l = layer(SlotKey::Settlement, 50);
        let at = LonLat::new(75.0, 25.0);
        l.set_features(vec![named_point("lower", at), named_point("upper", at)]);
        surface.attach(Arc::clone(&l));

        let hit = surface.feature_at(l.id(), at).unwrap();
        assert_eq!(hit.str_property(&["name"]), Some("upper"));
        assert!(surface.feature_at(l.id(), LonLat::new(76.0, 25.0)).is_none());
    }

    #[test]
    fn test_hidden_features_are_not_hit() {
        let surface = InMemorySurface::new();
        let l = layer(SlotKey::Settlement, 50);
        let at = LonLat::new(75.0, 25.0);
        l.set_features(vec![named_point("x", at)]);
        l.set_style(Style::Static(StyleDescriptor::hidden()));
        surface.attach(Arc::clone(&l));

        assert!(surface.feature_at(l.id(), at).is_none());
    }

    #[test]
    fn test_detached_layer_is_not_hit() {
        let surface = InMemorySurface::new();
        let l = layer(SlotKey::Settlement, 50);
        let at = LonLat::new(75.0, 25.0);
        l.set_features(vec![named_point("x", at)]);
        assert!(surface.feature_at(l.id(), at).is_none());
    }

    #[test]
    fn test_view_commands_recorded() {
        let surface = InMemorySurface::new();
        surface.set_view(LonLat::new(78.9, 20.6), 4.0);
        surface.animate_to(LonLat::new(75.0, 25.0), 17.0, Duration::from_millis(500));

        assert_eq!(surface.view_commands().len(), 2);
        assert!(matches!(
            surface.last_view(),
            Some(ViewCommand::AnimateTo { zoom, .. }) if zoom == 17.0
        ));
    }
}
