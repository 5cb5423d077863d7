//! Per-screen hit priority.

use crate::layer::SlotKey;
use crate::navigation::Screen;

/// Clickable slots on `screen`, highest priority first.
///
/// Point layers precede polygons so an asset sitting inside a watershed
/// polygon is picked over the polygon.
pub fn priority(screen: Screen) -> &'static [SlotKey] {
    match screen {
        Screen::HomeScreen => &[],
        Screen::ResourceMapping => &[
            SlotKey::Settlement,
            SlotKey::Well,
            SlotKey::WaterStructure,
            SlotKey::Cropping,
        ],
        Screen::Groundwater => &[
            SlotKey::RechargeWorks,
            SlotKey::Well,
            SlotKey::WaterStructure,
            SlotKey::Settlement,
            SlotKey::WellDepth,
        ],
        Screen::SurfaceWater => &[
            SlotKey::WaterStructure,
            SlotKey::Settlement,
            SlotKey::SurfaceWaterBodies,
        ],
        Screen::Agriculture => &[
            SlotKey::IrrigationWorks,
            SlotKey::Well,
            SlotKey::WaterStructure,
            SlotKey::Settlement,
            SlotKey::CroppingIntensity,
        ],
        Screen::Livelihood => &[
            SlotKey::LivelihoodWorks,
            SlotKey::NregaAssets,
            SlotKey::Settlement,
        ],
    }
}
