//! The transient feature selection.

use crate::coord::LonLat;
use crate::layer::{Properties, ResourceType, SlotKey};

/// Detail panel to render for a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Settlement,
    Well,
    Waterbody,
    Cropping,
    Work,
    NregaAsset,
    Watershed,
    SurfaceWaterBody,
    RasterInfo,
}

/// The most recently clicked feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSelection {
    /// Slot the feature was picked from.
    pub slot: SlotKey,
    pub resource_type: Option<ResourceType>,
    pub properties: Properties,
    pub panel: Panel,
    /// Map coordinate of the click that produced the selection.
    pub at: LonLat,
}

impl FeatureSelection {
    pub fn new(
        slot: SlotKey,
        resource_type: Option<ResourceType>,
        properties: Properties,
        panel: Panel,
        at: LonLat,
    ) -> Self {
        Self {
            slot,
            resource_type,
            properties,
            panel,
            at,
        }
    }

    /// String attribute of the selected feature.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_str())
    }
}
