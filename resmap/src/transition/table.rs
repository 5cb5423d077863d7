//! Declarative working-set table.
//!
//! Every `(screen, step)` pair maps to the slots that must be visible, each
//! with its z-rank. Ranks are banded so stacking holds across screens:
//!
//! | band      | ranks  |
//! |-----------|--------|
//! | base      | 0      |
//! | rasters   | 10-19  |
//! | polygons  | 20-29  |
//! | overlays  | 30-39  |
//! | boundary  | 40     |
//! | points    | 50-59  |
//! | marker    | 90     |

use crate::layer::{SlotKey, ZRank};
use crate::navigation::{NavigationState, Screen};

/// A slot in a working set and the rank it is drawn at.
pub type SlotEntry = (SlotKey, ZRank);

/// Slots kept across every transition.
pub const RETAINED: [SlotEntry; 3] = [
    (SlotKey::BaseImagery, 0),
    (SlotKey::AdminBoundary, 40),
    (SlotKey::UserMarker, 90),
];

const RESOURCE_MAPPING_0: &[SlotEntry] = &[(SlotKey::Settlement, 50)];

const RESOURCE_MAPPING_1: &[SlotEntry] = &[
    (SlotKey::Settlement, 50),
    (SlotKey::Well, 51),
    (SlotKey::WaterStructure, 52),
    (SlotKey::Cropping, 53),
];

const GROUNDWATER_0: &[SlotEntry] = &[
    (SlotKey::WellDepth, 20),
    (SlotKey::Fortnight, 30),
    (SlotKey::Settlement, 50),
    (SlotKey::WaterStructure, 52),
    (SlotKey::RechargeWorks, 54),
];

const GROUNDWATER_1: &[SlotEntry] = &[
    (SlotKey::Clart, 10),
    (SlotKey::Settlement, 50),
    (SlotKey::Well, 51),
    (SlotKey::WaterStructure, 52),
    (SlotKey::RechargeWorks, 54),
];

const SURFACE_WATER_0: &[SlotEntry] = &[
    (SlotKey::SurfaceWaterBodies, 21),
    (SlotKey::Drainage, 31),
    (SlotKey::Settlement, 50),
    (SlotKey::WaterStructure, 52),
];

const SURFACE_WATER_1: &[SlotEntry] = &[
    (SlotKey::Terrain, 12),
    (SlotKey::SurfaceWaterBodies, 21),
    (SlotKey::Drainage, 31),
    (SlotKey::WaterStructure, 52),
];

const AGRICULTURE_0: &[SlotEntry] = &[
    (SlotKey::Lulc, 11),
    (SlotKey::Settlement, 50),
    (SlotKey::Well, 51),
    (SlotKey::WaterStructure, 52),
    (SlotKey::IrrigationWorks, 55),
];

const AGRICULTURE_1: &[SlotEntry] = &[
    (SlotKey::CroppingIntensity, 22),
    (SlotKey::Settlement, 50),
    (SlotKey::Well, 51),
    (SlotKey::IrrigationWorks, 55),
];

const LIVELIHOOD_0: &[SlotEntry] = &[
    (SlotKey::Settlement, 50),
    (SlotKey::LivelihoodWorks, 56),
    (SlotKey::NregaAssets, 57),
];

/// Non-retained slots visible in `state`, in ascending z-rank.
///
/// Out-of-range steps yield an empty set; [`NavigationState::new`] keeps
/// them from reaching here.
pub fn working_set(state: NavigationState) -> &'static [SlotEntry] {
    match (state.screen, state.step) {
        (Screen::HomeScreen, _) => &[],
        (Screen::ResourceMapping, 0) => RESOURCE_MAPPING_0,
        (Screen::ResourceMapping, 1) => RESOURCE_MAPPING_1,
        (Screen::Groundwater, 0) => GROUNDWATER_0,
        (Screen::Groundwater, 1) => GROUNDWATER_1,
        (Screen::SurfaceWater, 0) => SURFACE_WATER_0,
        (Screen::SurfaceWater, 1) => SURFACE_WATER_1,
        (Screen::Agriculture, 0) => AGRICULTURE_0,
        (Screen::Agriculture, 1) => AGRICULTURE_1,
        (Screen::Livelihood, 0) => LIVELIHOOD_0,
        _ => &[],
    }
}

/// Rank of `key` in `state`, counting retained slots.
pub fn rank_in(state: NavigationState, key: SlotKey) -> Option<ZRank> {
    RETAINED
        .iter()
        .chain(working_set(state))
        .find(|(k, _)| *k == key)
        .map(|(_, z)| *z)
}

/// Every slot visible in `state`: retained first, then the working set.
pub fn visible_keys(state: NavigationState) -> Vec<SlotKey> {
    RETAINED
        .iter()
        .chain(working_set(state))
        .map(|(k, _)| *k)
        .collect()
}
