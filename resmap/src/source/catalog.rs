//! Static description of every slot's remote source.

use super::request::{FeatureRequest, SourceDescriptor, TileRequest, XyzSource};
use crate::layer::SlotKey;

/// Satellite hybrid imagery used as the base layer.
pub const DEFAULT_BASE_IMAGERY: &str = "https://mt1.google.com/vt/lyrs=y&x={x}&y={y}&z={z}";

/// Normalize a district or block name for use in a remote layer name.
///
/// Lower-cases and replaces every whitespace run with a single `_`.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// The plan a session works on. Scopes every remote layer name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanContext {
    pub plan_id: String,
    pub plan_name: String,
    pub district: String,
    pub block: String,
}

impl PlanContext {
    pub fn new(plan_id: &str, plan_name: &str, district: &str, block: &str) -> Self {
        Self {
            plan_id: plan_id.to_string(),
            plan_name: plan_name.to_string(),
            district: district.to_string(),
            block: block.to_string(),
        }
    }

    /// `<district>_<block>`, normalized.
    pub fn area_suffix(&self) -> String {
        format!(
            "{}_{}",
            normalize_name(&self.district),
            normalize_name(&self.block)
        )
    }

    /// `<plan>_<district>_<block>`, normalized.
    pub fn plan_suffix(&self) -> String {
        format!("{}_{}", normalize_name(&self.plan_id), self.area_suffix())
    }
}

/// Maps slot keys to the concrete service sources for one server.
#[derive(Debug, Clone)]
pub struct LayerCatalog {
    geoserver_url: String,
    base_imagery: String,
}

impl LayerCatalog {
    pub fn new(geoserver_url: &str) -> Self {
        Self {
            geoserver_url: geoserver_url.to_string(),
            base_imagery: DEFAULT_BASE_IMAGERY.to_string(),
        }
    }

    pub fn with_base_imagery(mut self, template: &str) -> Self {
        self.base_imagery = template.to_string();
        self
    }

    pub fn geoserver_url(&self) -> &str {
        &self.geoserver_url
    }

    fn feature(&self, workspace: &str, type_name: String) -> SourceDescriptor {
        SourceDescriptor::Feature(FeatureRequest::new(
            &self.geoserver_url,
            workspace,
            &type_name,
        ))
    }

    fn tile(&self, workspace: &str, layer: String) -> SourceDescriptor {
        SourceDescriptor::Tile(TileRequest::new(
            &self.geoserver_url,
            &format!("{}:{}", workspace, layer),
        ))
    }

    /// Source of `key` for the given plan.
    pub fn source_for(&self, key: SlotKey, plan: &PlanContext) -> SourceDescriptor {
        let area = plan.area_suffix();
        let scoped = plan.plan_suffix();
        match key {
            SlotKey::BaseImagery => SourceDescriptor::Xyz(XyzSource::new(&self.base_imagery)),
            SlotKey::UserMarker => SourceDescriptor::Local,
            SlotKey::AdminBoundary => self.feature("panchayat_boundaries", area),
            SlotKey::Settlement => self.feature("resources", format!("settlement_{}", scoped)),
            SlotKey::Well => self.feature("resources", format!("well_{}", scoped)),
            SlotKey::WaterStructure => self.feature("resources", format!("waterbody_{}", scoped)),
            SlotKey::Cropping => self.feature("resources", format!("cropping_{}", scoped)),
            SlotKey::NregaAssets => self.feature("nrega_assets", area),
            SlotKey::RechargeWorks => self.feature("works", format!("plan_gw_{}", scoped)),
            SlotKey::IrrigationWorks => self.feature("works", format!("plan_agri_{}", scoped)),
            SlotKey::LivelihoodWorks => self.feature("works", format!("livelihood_{}", scoped)),
            SlotKey::WellDepth => {
                self.feature("mws_layers", format!("deltaG_well_depth_{}", area))
            }
            SlotKey::Fortnight => self.feature("mws_layers", format!("deltaG_fortnight_{}", area)),
            SlotKey::Drainage => self.feature("drainage", area),
            SlotKey::SurfaceWaterBodies => {
                self.feature("swb", format!("surface_waterbodies_{}", area))
            }
            SlotKey::CroppingIntensity => {
                self.feature("crop_intensity", format!("{}_intensity", area))
            }
            SlotKey::Clart => self.tile("clart", format!("{}_clart", area)),
            SlotKey::Lulc => self.tile(
                "LULC_level_3",
                format!("LULC_22_23_{}_level_3", normalize_name(&plan.block)),
            ),
            SlotKey::Terrain => self.tile("terrain", format!("{}_terrain_raster", area)),
        }
    }

    /// `(workspace, layer)` for slots that support raster point queries.
    pub fn raster_query_layer(&self, key: SlotKey, plan: &PlanContext) -> Option<(String, String)> {
        let area = plan.area_suffix();
        match key {
            SlotKey::Clart => Some(("clart".to_string(), format!("{}_clart", area))),
            SlotKey::Lulc => Some((
                "LULC_level_3".to_string(),
                format!("LULC_22_23_{}_level_3", normalize_name(&plan.block)),
            )),
            SlotKey::Terrain => Some(("terrain".to_string(), format!("{}_terrain_raster", area))),
            _ => None,
        }
    }
}
