//! Layer cache.
//!
//! One slot per [`SlotKey`], each holding at most one live layer. Layers are
//! created on first demand and reused across revisits; nothing is evicted.
//! A slot is only invalidated explicitly, after a data-mutating action.
//!
//! Replacing or clearing a slot detaches the previous instance from the
//! surface first, so the surface never holds an orphan no slot owns.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::layer::{LayerHandle, SlotKey};
use crate::surface::RenderSurface;

/// Slot-keyed store of live layers.
pub struct LayerCache {
    surface: Arc<dyn RenderSurface>,
    slots: Mutex<HashMap<SlotKey, LayerHandle>>,
}

impl LayerCache {
    pub fn new(surface: Arc<dyn RenderSurface>) -> Self {
        Self {
            surface,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: SlotKey) -> Option<LayerHandle> {
        self.slots.lock().get(&key).cloned()
    }

    /// Store `layer` in its slot, detaching whatever was there before.
    pub fn set(&self, key: SlotKey, layer: LayerHandle) {
        let previous = self.slots.lock().insert(key, layer);
        if let Some(previous) = previous {
            if self.surface.detach(previous.id()) {
                debug!(slot = %key, layer_id = %previous.id(), "Detached replaced layer");
            }
        }
    }

    /// Empty a slot, detaching its layer. Returns the removed layer.
    pub fn clear(&self, key: SlotKey) -> Option<LayerHandle> {
        let removed = self.slots.lock().remove(&key);
        if let Some(layer) = &removed {
            self.surface.detach(layer.id());
            debug!(slot = %key, layer_id = %layer.id(), "Cleared slot");
        }
        removed
    }

    /// Occupied slots, in declaration order.
    pub fn keys(&self) -> Vec<SlotKey> {
        let slots = self.slots.lock();
        SlotKey::ALL
            .iter()
            .copied()
            .filter(|k| slots.contains_key(k))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }

    /// Clear every slot.
    pub fn clear_all(&self) {
        let drained: Vec<LayerHandle> = self.slots.lock().drain().map(|(_, l)| l).collect();
        for layer in &drained {
            self.surface.detach(layer.id());
        }
        debug!(count = drained.len(), "Cleared layer cache");
    }
}

impl std::fmt::Debug for LayerCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerCache")
            .field("slots", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layer;
    use crate::load::LoadStateCell;
    use crate::source::SourceDescriptor;
    use crate::style::Style;
    use crate::surface::InMemorySurface;
    use proptest::prelude::*;

    fn layer(key: SlotKey) -> LayerHandle {
        Arc::new(Layer::new(
            key,
            key.kind(),
            SourceDescriptor::Local,
            Style::default(),
            LoadStateCell::new(),
        ))
    }

    fn setup() -> (Arc<InMemorySurface>, LayerCache) {
        let surface = Arc::new(InMemorySurface::new());
        let cache = LayerCache::new(surface.clone());
        (surface, cache)
    }

    #[test]
    fn test_get_set_clear() {
        let (_surface, cache) = setup();
        let l = layer(SlotKey::Settlement);

        cache.set(SlotKey::Settlement, Arc::clone(&l));
        assert_eq!(cache.get(SlotKey::Settlement).map(|x| x.id()), Some(l.id()));

        cache.clear(SlotKey::Settlement);
        assert!(cache.get(SlotKey::Settlement).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_detaches_previous_layer() {
        let (surface, cache) = setup();
        let old = layer(SlotKey::Well);
        surface.attach(Arc::clone(&old));
        cache.set(SlotKey::Well, Arc::clone(&old));

        let new = layer(SlotKey::Well);
        cache.set(SlotKey::Well, Arc::clone(&new));

        assert!(!surface.contains(old.id()));
        assert_eq!(cache.get(SlotKey::Well).map(|x| x.id()), Some(new.id()));
    }

    #[test]
    fn test_clear_detaches() {
        let (surface, cache) = setup();
        let l = layer(SlotKey::Drainage);
        surface.attach(Arc::clone(&l));
        cache.set(SlotKey::Drainage, Arc::clone(&l));

        let removed = cache.clear(SlotKey::Drainage);
        assert_eq!(removed.map(|x| x.id()), Some(l.id()));
        assert!(!surface.contains(l.id()));
        assert!(cache.clear(SlotKey::Drainage).is_none());
    }

    #[test]
    fn test_clear_all_empties_surface() {
        let (surface, cache) = setup();
        for key in [SlotKey::BaseImagery, SlotKey::Settlement, SlotKey::Clart] {
            let l = layer(key);
            surface.attach(Arc::clone(&l));
            cache.set(key, l);
        }
        assert_eq!(
            cache.keys(),
            vec![SlotKey::BaseImagery, SlotKey::Settlement, SlotKey::Clart]
        );

        cache.clear_all();
        assert_eq!(cache.len(), 0);
        assert!(surface.layers().is_empty());
    }

    proptest! {
        #[test]
        fn prop_surface_only_holds_cached_instances(ops in prop::collection::vec((0usize..19, any::<bool>()), 1..60)) {
            let (surface, cache) = setup();
            for (idx, insert) in ops {
                let key = SlotKey::ALL[idx];
                if insert {
                    let l = layer(key);
                    surface.attach(Arc::clone(&l));
                    cache.set(key, l);
                } else {
                    cache.clear(key);
                }
            }

            let attached = surface.layers();
            prop_assert_eq!(attached.len(), cache.len());
            for l in attached {
                prop_assert_eq!(cache.get(l.key()).map(|c| c.id()), Some(l.id()));
            }
        }
    }
}
