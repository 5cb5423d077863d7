//! Layer identity types.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Z-order rank on the rendering surface. Higher ranks draw on top.
pub type ZRank = i32;

/// Unique identity of one layer instance.
///
/// Two layers created for the same slot (e.g. after a refresh) always have
/// different ids, which is what lets the surface and the hit-test registry
/// tell a stale instance from the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

impl LayerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// How a layer's data is sourced and drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Vector polygons fetched from the feature service.
    PolygonFeature,
    /// Vector points fetched from the feature service.
    PointFeature,
    /// Raster tiles loaded by the rendering engine from a tile service.
    RasterTile,
    /// Dense vector data fetched from the feature service and drawn by the
    /// engine's GPU renderer.
    HardwareVectorOverlay,
}

impl LayerKind {
    /// True for kinds whose data is fetched as a feature collection.
    pub fn is_feature_backed(&self) -> bool {
        !matches!(self, LayerKind::RasterTile)
    }
}

/// Semantic name of a layer cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotKey {
    BaseImagery,
    AdminBoundary,
    UserMarker,
    Settlement,
    Well,
    WaterStructure,
    Cropping,
    NregaAssets,
    RechargeWorks,
    IrrigationWorks,
    LivelihoodWorks,
    WellDepth,
    Fortnight,
    Drainage,
    SurfaceWaterBodies,
    CroppingIntensity,
    Clart,
    Lulc,
    Terrain,
}

impl SlotKey {
    /// Every slot, in declaration order.
    pub const ALL: [SlotKey; 19] = [
        SlotKey::BaseImagery,
        SlotKey::AdminBoundary,
        SlotKey::UserMarker,
        SlotKey::Settlement,
        SlotKey::Well,
        SlotKey::WaterStructure,
        SlotKey::Cropping,
        SlotKey::NregaAssets,
        SlotKey::RechargeWorks,
        SlotKey::IrrigationWorks,
        SlotKey::LivelihoodWorks,
        SlotKey::WellDepth,
        SlotKey::Fortnight,
        SlotKey::Drainage,
        SlotKey::SurfaceWaterBodies,
        SlotKey::CroppingIntensity,
        SlotKey::Clart,
        SlotKey::Lulc,
        SlotKey::Terrain,
    ];

    /// Slots that survive every screen change.
    pub const RETAINED: [SlotKey; 3] = [
        SlotKey::BaseImagery,
        SlotKey::AdminBoundary,
        SlotKey::UserMarker,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SlotKey::BaseImagery => "base_imagery",
            SlotKey::AdminBoundary => "admin_boundary",
            SlotKey::UserMarker => "user_marker",
            SlotKey::Settlement => "settlement",
            SlotKey::Well => "well",
            SlotKey::WaterStructure => "water_structure",
            SlotKey::Cropping => "cropping",
            SlotKey::NregaAssets => "nrega_assets",
            SlotKey::RechargeWorks => "recharge_works",
            SlotKey::IrrigationWorks => "irrigation_works",
            SlotKey::LivelihoodWorks => "livelihood_works",
            SlotKey::WellDepth => "well_depth",
            SlotKey::Fortnight => "fortnight",
            SlotKey::Drainage => "drainage",
            SlotKey::SurfaceWaterBodies => "surface_water_bodies",
            SlotKey::CroppingIntensity => "cropping_intensity",
            SlotKey::Clart => "clart",
            SlotKey::Lulc => "lulc",
            SlotKey::Terrain => "terrain",
        }
    }

    pub fn kind(&self) -> LayerKind {
        match self {
            SlotKey::BaseImagery | SlotKey::Clart | SlotKey::Lulc | SlotKey::Terrain => {
                LayerKind::RasterTile
            }
            SlotKey::AdminBoundary
            | SlotKey::WellDepth
            | SlotKey::SurfaceWaterBodies
            | SlotKey::CroppingIntensity => LayerKind::PolygonFeature,
            SlotKey::Fortnight | SlotKey::Drainage => LayerKind::HardwareVectorOverlay,
            SlotKey::UserMarker
            | SlotKey::Settlement
            | SlotKey::Well
            | SlotKey::WaterStructure
            | SlotKey::Cropping
            | SlotKey::NregaAssets
            | SlotKey::RechargeWorks
            | SlotKey::IrrigationWorks
            | SlotKey::LivelihoodWorks => LayerKind::PointFeature,
        }
    }

    pub fn is_retained(&self) -> bool {
        Self::RETAINED.contains(self)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SlotKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotKey::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| format!("unknown layer slot '{}'", s))
    }
}

/// Resource type tag of surveyed assets.
///
/// Ties a form submission and a clicked feature back to the slot that
/// displays that resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Settlement,
    Well,
    Waterbody,
    Cropping,
    RechargeWork,
    IrrigationWork,
    LivelihoodWork,
}

impl ResourceType {
    pub const ALL: [ResourceType; 7] = [
        ResourceType::Settlement,
        ResourceType::Well,
        ResourceType::Waterbody,
        ResourceType::Cropping,
        ResourceType::RechargeWork,
        ResourceType::IrrigationWork,
        ResourceType::LivelihoodWork,
    ];

    /// Wire name used in form links and submission payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Settlement => "settlement",
            ResourceType::Well => "well",
            ResourceType::Waterbody => "waterbody",
            ResourceType::Cropping => "cropping",
            ResourceType::RechargeWork => "plan_gw",
            ResourceType::IrrigationWork => "plan_agri",
            ResourceType::LivelihoodWork => "livelihood",
        }
    }

    /// The slot whose layer displays this resource.
    pub fn slot(&self) -> SlotKey {
        match self {
            ResourceType::Settlement => SlotKey::Settlement,
            ResourceType::Well => SlotKey::Well,
            ResourceType::Waterbody => SlotKey::WaterStructure,
            ResourceType::Cropping => SlotKey::Cropping,
            ResourceType::RechargeWork => SlotKey::RechargeWorks,
            ResourceType::IrrigationWork => SlotKey::IrrigationWorks,
            ResourceType::LivelihoodWork => SlotKey::LivelihoodWorks,
        }
    }

    /// Inverse of [`ResourceType::slot`] for asset slots.
    pub fn for_slot(key: SlotKey) -> Option<ResourceType> {
        ResourceType::ALL.iter().copied().find(|r| r.slot() == key)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ResourceType::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == lower)
            .ok_or_else(|| format!("unknown resource type '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_ids_are_unique() {
        let a = LayerId::next();
        let b = LayerId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_slot_names_round_trip() {
        for key in SlotKey::ALL {
            assert_eq!(key.name().parse::<SlotKey>().unwrap(), key);
        }
        assert!("nonexistent".parse::<SlotKey>().is_err());
    }

    #[test]
    fn test_retained_slots() {
        assert!(SlotKey::BaseImagery.is_retained());
        assert!(SlotKey::AdminBoundary.is_retained());
        assert!(SlotKey::UserMarker.is_retained());
        assert!(!SlotKey::Settlement.is_retained());
    }

    #[test]
    fn test_slot_kinds() {
        assert_eq!(SlotKey::Clart.kind(), LayerKind::RasterTile);
        assert_eq!(SlotKey::WellDepth.kind(), LayerKind::PolygonFeature);
        assert_eq!(SlotKey::Fortnight.kind(), LayerKind::HardwareVectorOverlay);
        assert_eq!(SlotKey::Settlement.kind(), LayerKind::PointFeature);
        assert!(!LayerKind::RasterTile.is_feature_backed());
    }

    #[test]
    fn test_resource_type_slots() {
        assert_eq!(ResourceType::Waterbody.slot(), SlotKey::WaterStructure);
        assert_eq!(
            ResourceType::for_slot(SlotKey::Settlement),
            Some(ResourceType::Settlement)
        );
        assert_eq!(ResourceType::for_slot(SlotKey::Clart), None);
        assert_eq!("Settlement".parse::<ResourceType>().unwrap(), ResourceType::Settlement);
    }
}
