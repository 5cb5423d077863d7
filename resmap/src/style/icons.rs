//! Asset icon selection.
//!
//! Icons are chosen by `{needs-maintenance, structure-type}`. Structure
//! types are matched case-insensitively; anything unrecognized gets the
//! asset class's own icon, or [`GENERIC_ICON`] if the class has none.

use super::types::{StyleDescriptor, StyleResolver};
use crate::layer::Feature;

pub const GENERIC_ICON: &str = "icons/generic_asset.svg";

/// Attribute names carrying the structure type, in lookup order.
const STRUCTURE_TYPE_KEYS: &[&str] = &[
    "work_type",
    "TYPE_OF_WO",
    "selected_w",
    "wb_type",
    "TYPE_OF_WB",
    "structure_type",
];

/// Attribute names carrying the maintenance flag, in lookup order.
const MAINTENANCE_KEYS: &[&str] = &["Maintenance", "maintenance", "need_maint", "repair"];

/// `(structure type, icon, maintenance icon)`.
const STRUCTURE_ICONS: &[(&str, &str, &str)] = &[
    ("check dam", "icons/check_dam.svg", "icons/check_dam_maintenance.svg"),
    ("farm pond", "icons/farm_pond.svg", "icons/farm_pond_maintenance.svg"),
    (
        "percolation tank",
        "icons/percolation_tank.svg",
        "icons/percolation_tank_maintenance.svg",
    ),
    (
        "community pond",
        "icons/community_pond.svg",
        "icons/community_pond_maintenance.svg",
    ),
    ("canal", "icons/canal.svg", "icons/canal_maintenance.svg"),
    (
        "loose boulder structure",
        "icons/boulder.svg",
        "icons/boulder_maintenance.svg",
    ),
    ("trench cum bund", "icons/tcb.svg", "icons/tcb_maintenance.svg"),
    ("earthen gully plug", "icons/gully_plug.svg", "icons/gully_plug_maintenance.svg"),
    ("diversion drains", "icons/diversion.svg", "icons/diversion_maintenance.svg"),
    ("farm bund", "icons/farm_bund.svg", "icons/farm_bund_maintenance.svg"),
    ("well", "icons/well_work.svg", "icons/well_work_maintenance.svg"),
    ("livestock", "icons/livestock.svg", "icons/livestock.svg"),
    ("fisheries", "icons/fisheries.svg", "icons/fisheries.svg"),
    ("plantation", "icons/plantation.svg", "icons/plantation.svg"),
];

pub(crate) fn structure_type(feature: &Feature) -> Option<String> {
    feature
        .str_property(STRUCTURE_TYPE_KEYS)
        .map(|s| s.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" "))
}

fn structure_icon(kind: &str, needs_maintenance: bool) -> Option<&'static str> {
    STRUCTURE_ICONS
        .iter()
        .find(|(name, _, _)| *name == kind)
        .map(|(_, icon, maintenance)| if needs_maintenance { *maintenance } else { *icon })
}

/// Which asset family a point layer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    Settlement,
    Well,
    Waterbody,
    Cropping,
    NregaAsset,
    Work,
    UserLocation,
}

impl AssetClass {
    fn icons(&self) -> Option<(&'static str, &'static str)> {
        match self {
            AssetClass::Settlement => Some(("icons/settlement.svg", "icons/settlement.svg")),
            AssetClass::Well => Some(("icons/well.svg", "icons/well_maintenance.svg")),
            AssetClass::Waterbody => Some(("icons/waterbody.svg", "icons/waterbody_maintenance.svg")),
            AssetClass::Cropping => Some(("icons/cropping.svg", "icons/cropping.svg")),
            AssetClass::NregaAsset => Some(("icons/nrega.svg", "icons/nrega.svg")),
            AssetClass::UserLocation => Some(("icons/user_location.svg", "icons/user_location.svg")),
            AssetClass::Work => None,
        }
    }

    /// Whether a recognized structure type overrides the class icon.
    fn uses_structure_type(&self) -> bool {
        matches!(self, AssetClass::Waterbody | AssetClass::Work)
    }
}

/// Icon resolver for point asset layers.
#[derive(Debug, Clone, Copy)]
pub struct AssetIconResolver {
    class: AssetClass,
}

impl AssetIconResolver {
    pub fn new(class: AssetClass) -> Self {
        Self { class }
    }

    pub fn class(&self) -> AssetClass {
        self.class
    }
}

impl StyleResolver for AssetIconResolver {
    fn resolve(&self, feature: &Feature) -> StyleDescriptor {
        let needs_maintenance = feature.flag_property(MAINTENANCE_KEYS);

        if self.class.uses_structure_type() {
            if let Some(icon) = structure_type(feature)
                .as_deref()
                .and_then(|kind| structure_icon(kind, needs_maintenance))
            {
                return StyleDescriptor::icon(icon);
            }
        }

        let icon = self
            .class
            .icons()
            .map(|(plain, maintenance)| if needs_maintenance { maintenance } else { plain })
            .unwrap_or(GENERIC_ICON);
        StyleDescriptor::icon(icon)
    }
}
