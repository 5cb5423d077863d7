//! Slot-specific click handlers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::coord::LonLat;
use crate::layer::{Feature, ResourceType, SlotKey};
use crate::navigation::{FeatureSelection, Panel};
use crate::style::{PolygonSelectionResolver, Style, TrendColorResolver};

/// What a handler makes of a hit.
#[derive(Debug, Clone)]
pub struct HandlerResult {
    pub selection: FeatureSelection,
    /// Style to apply to the clicked layer, if the click changes it.
    pub restyle: Option<Style>,
}

/// Maps a hit feature to a selection.
pub trait FeatureHandler: Send + Sync {
    fn handle(&self, slot: SlotKey, feature: &Feature, at: LonLat) -> HandlerResult;
}

/// Opens the detail panel of a point asset.
#[derive(Debug, Clone, Copy)]
pub struct AssetHandler {
    panel: Panel,
}

impl AssetHandler {
    pub fn new(panel: Panel) -> Self {
        Self { panel }
    }
}

impl FeatureHandler for AssetHandler {
    fn handle(&self, slot: SlotKey, feature: &Feature, at: LonLat) -> HandlerResult {
        HandlerResult {
            selection: FeatureSelection::new(
                slot,
                ResourceType::for_slot(slot),
                feature.properties.clone(),
                self.panel,
                at,
            ),
            restyle: None,
        }
    }
}

/// Selects a watershed polygon and highlights it among its siblings.
#[derive(Debug, Clone, Default)]
pub struct WellDepthHandler {
    siblings: TrendColorResolver,
}

impl FeatureHandler for WellDepthHandler {
    fn handle(&self, slot: SlotKey, feature: &Feature, at: LonLat) -> HandlerResult {
        let restyle = feature.id_string().map(|id| {
            Style::resolver(PolygonSelectionResolver::new(&id, self.siblings.clone()))
        });
        HandlerResult {
            selection: FeatureSelection::new(
                slot,
                None,
                feature.properties.clone(),
                Panel::Watershed,
                at,
            ),
            restyle,
        }
    }
}

/// Explicit `SlotKey → handler` table.
#[derive(Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<SlotKey, Arc<dyn FeatureHandler>>,
}

impl HandlerRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, key: SlotKey, handler: Arc<dyn FeatureHandler>) {
        self.handlers.insert(key, handler);
    }

    pub fn get(&self, key: SlotKey) -> Option<&Arc<dyn FeatureHandler>> {
        self.handlers.get(&key)
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        let assets = [
            (SlotKey::Settlement, Panel::Settlement),
            (SlotKey::Well, Panel::Well),
            (SlotKey::WaterStructure, Panel::Waterbody),
            (SlotKey::Cropping, Panel::Cropping),
            (SlotKey::NregaAssets, Panel::NregaAsset),
            (SlotKey::RechargeWorks, Panel::Work),
            (SlotKey::IrrigationWorks, Panel::Work),
            (SlotKey::LivelihoodWorks, Panel::Work),
            (SlotKey::SurfaceWaterBodies, Panel::SurfaceWaterBody),
            (SlotKey::CroppingIntensity, Panel::Cropping),
        ];
        for (key, panel) in assets {
            registry.register(key, Arc::new(AssetHandler::new(panel)));
        }
        registry.register(SlotKey::WellDepth, Arc::new(WellDepthHandler::default()));
        registry
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.handlers.keys().map(|k| k.name()).collect();
        keys.sort_unstable();
        f.debug_struct("HandlerRegistry").field("slots", &keys).finish()
    }
}
