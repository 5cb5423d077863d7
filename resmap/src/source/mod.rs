//! Layer source adapters.
//!
//! This module wraps the remote geospatial endpoints the map draws from:
//!
//! - feature service (WFS `GetFeature`, GeoJSON output) for polygon, point
//!   and hardware vector layers
//! - tile service (WMS `GetMap`, tiled) and an XYZ template for rasters
//! - raster point queries (WMS `GetFeatureInfo` over a one-pixel window)
//!
//! # Factory
//!
//! The [`LayerFactory`] trait is the seam the transition controller uses
//! to fill empty slots. [`ServiceLayerFactory`] is the production
//! implementation:
//!
//! ```ignore
//! use resmap::source::{LayerCatalog, PlanContext, ReqwestClient, ServiceLayerFactory};
//!
//! let client = Arc::new(ReqwestClient::new()?);
//! let factory = ServiceLayerFactory::new(client, LayerCatalog::new(url), plan);
//! let (layer, completion) = factory.create(SlotKey::Settlement, style);
//! ```

mod adapter;
mod catalog;
mod error;
mod http;
mod raster_query;
mod request;

pub use adapter::{LayerFactory, ServiceLayerFactory};
pub use catalog::{normalize_name, LayerCatalog, PlanContext, DEFAULT_BASE_IMAGERY};
pub use error::SourceError;
pub use http::{AsyncHttpClient, ReqwestClient};
pub use raster_query::{RasterQueryClient, RasterValue};
pub use request::{FeatureRequest, RasterPointQuery, SourceDescriptor, TileRequest, XyzSource};

#[cfg(test)]
pub use http::tests::MockHttpClient;
