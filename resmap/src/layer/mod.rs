//! Layers and the semantic slot keys they are addressed by.
//!
//! A [`Layer`] is one addressable unit of visualized geospatial data. Each
//! layer instance belongs to exactly one [`SlotKey`] and is shared between
//! the layer cache and the rendering surface as an `Arc<Layer>`.
//!
//! # Slots
//!
//! ```text
//! retained:  BaseImagery, AdminBoundary, UserMarker
//! assets:    Settlement, Well, WaterStructure, Cropping, NregaAssets,
//!            RechargeWorks, IrrigationWorks, LivelihoodWorks
//! analysis:  WellDepth, Fortnight, Drainage, SurfaceWaterBodies,
//!            CroppingIntensity, Clart, Lulc, Terrain
//! ```

mod feature;
mod handle;
mod types;

pub use feature::{Feature, FeatureCollection, Geometry, Properties};
pub use handle::{Layer, LayerHandle};
pub use types::{LayerId, LayerKind, ResourceType, SlotKey, ZRank};
