//! Priority-ordered hit testing.

use std::sync::Arc;

use tracing::debug;

use super::handler::HandlerRegistry;
use super::priority::priority;
use crate::cache::LayerCache;
use crate::coord::LonLat;
use crate::layer::{Feature, LayerHandle, SlotKey};
use crate::navigation::{FeatureSelection, Screen};
use crate::surface::RenderSurface;

/// A resolved click.
#[derive(Debug, Clone)]
pub struct HitResult {
    pub layer: LayerHandle,
    pub feature: Feature,
    pub selection: FeatureSelection,
}

/// Resolves clicks against the cached, attached layers of a screen.
pub struct HitTestDispatcher {
    cache: Arc<LayerCache>,
    surface: Arc<dyn RenderSurface>,
    registry: HandlerRegistry,
}

impl HitTestDispatcher {
    pub fn new(cache: Arc<LayerCache>, surface: Arc<dyn RenderSurface>) -> Self {
        Self::with_registry(cache, surface, HandlerRegistry::default())
    }

    pub fn with_registry(
        cache: Arc<LayerCache>,
        surface: Arc<dyn RenderSurface>,
        registry: HandlerRegistry,
    ) -> Self {
        Self {
            cache,
            surface,
            registry,
        }
    }

    /// Layers that may take a click on `screen`, priority order.
    pub fn candidates(&self, screen: Screen) -> Vec<LayerHandle> {
        priority(screen)
            .iter()
            .filter_map(|key| self.cache.get(*key))
            .filter(|layer| self.surface.contains(layer.id()))
            .collect()
    }

    /// Resolve a click. The first candidate with a feature under the
    /// pointer wins; its handler's restyle is applied to the layer.
    pub fn dispatch(&self, screen: Screen, at: LonLat) -> Option<HitResult> {
        for layer in self.candidates(screen) {
            let Some(feature) = self.surface.feature_at(layer.id(), at) else {
                continue;
            };
            let Some(handler) = self.registry.get(layer.key()) else {
                debug!(slot = %layer.key(), "Hit on slot without handler");
                continue;
            };

            let result = handler.handle(layer.key(), &feature, at);
            if let Some(style) = result.restyle {
                layer.set_style(style);
            }
            debug!(slot = %layer.key(), layer_id = %layer.id(), at = %at, "Feature selected");
            return Some(HitResult {
                layer,
                feature,
                selection: result.selection,
            });
        }
        None
    }

    /// Whether `key` is clickable on `screen`.
    pub fn is_clickable(screen: Screen, key: SlotKey) -> bool {
        priority(screen).contains(&key)
    }
}
