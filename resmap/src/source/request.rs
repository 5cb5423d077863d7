//! Request descriptors for the remote geospatial services.

use reqwest::Url;

use super::error::SourceError;
use crate::coord::{Extent, LonLat};

/// Output format requested from the feature service.
pub const GEOJSON_FORMAT: &str = "application/json";

/// Half-width in degrees of the window used for raster point queries.
pub const POINT_QUERY_HALF_WIDTH: f64 = 0.0001;

fn build_url(base: &str, params: &[(String, String)]) -> Result<String, SourceError> {
    Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|e| SourceError::InvalidUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })
}

fn trim_endpoint(endpoint: &str) -> &str {
    endpoint.trim_end_matches('/')
}

/// Feature-service request: `{endpoint, typeName, outputFormat, filterParams}`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRequest {
    pub endpoint: String,
    pub workspace: String,
    pub type_name: String,
    pub output_format: String,
    pub filter_params: Vec<(String, String)>,
}

impl FeatureRequest {
    pub fn new(endpoint: &str, workspace: &str, type_name: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            workspace: workspace.to_string(),
            type_name: type_name.to_string(),
            output_format: GEOJSON_FORMAT.to_string(),
            filter_params: Vec::new(),
        }
    }

    /// Add a vendor filter parameter, e.g. `CQL_FILTER`.
    pub fn with_filter(mut self, key: &str, value: &str) -> Self {
        self.filter_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Qualified `workspace:type` name.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.workspace, self.type_name)
    }

    /// WFS `GetFeature` URL.
    pub fn url(&self) -> Result<String, SourceError> {
        let base = format!("{}/{}/ows", trim_endpoint(&self.endpoint), self.workspace);
        let mut params = vec![
            ("service".to_string(), "WFS".to_string()),
            ("version".to_string(), "1.0.0".to_string()),
            ("request".to_string(), "GetFeature".to_string()),
            ("typeName".to_string(), self.qualified_name()),
            ("outputFormat".to_string(), self.output_format.clone()),
        ];
        params.extend(self.filter_params.iter().cloned());
        build_url(&base, &params)
    }
}

/// Tile-service request: `{endpoint, layerName, styleName, tiled}`.
///
/// The rendering engine's tile loader appends `BBOX`, `WIDTH` and `HEIGHT`
/// per tile; this descriptor supplies the fixed part.
#[derive(Debug, Clone, PartialEq)]
pub struct TileRequest {
    pub endpoint: String,
    pub layer_name: String,
    pub style_name: Option<String>,
    pub tiled: bool,
}

impl TileRequest {
    pub fn new(endpoint: &str, layer_name: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            layer_name: layer_name.to_string(),
            style_name: None,
            tiled: true,
        }
    }

    pub fn with_style(mut self, style: &str) -> Self {
        self.style_name = Some(style.to_string());
        self
    }

    pub fn base_url(&self) -> String {
        format!("{}/wms", trim_endpoint(&self.endpoint))
    }

    /// Fixed WMS `GetMap` parameters.
    pub fn params(&self) -> Vec<(String, String)> {
        vec![
            ("SERVICE".to_string(), "WMS".to_string()),
            ("VERSION".to_string(), "1.1.1".to_string()),
            ("REQUEST".to_string(), "GetMap".to_string()),
            ("FORMAT".to_string(), "image/png".to_string()),
            ("TRANSPARENT".to_string(), "true".to_string()),
            ("LAYERS".to_string(), self.layer_name.clone()),
            (
                "STYLES".to_string(),
                self.style_name.clone().unwrap_or_default(),
            ),
            ("TILED".to_string(), self.tiled.to_string()),
        ]
    }

    /// `GetMap` URL for one tile covering `bbox`.
    pub fn tile_url(&self, bbox: &Extent, size: u32) -> Result<String, SourceError> {
        let mut params = self.params();
        params.push(("SRS".to_string(), "EPSG:4326".to_string()));
        params.push(("BBOX".to_string(), bbox.to_bbox_param()));
        params.push(("WIDTH".to_string(), size.to_string()));
        params.push(("HEIGHT".to_string(), size.to_string()));
        build_url(&self.base_url(), &params)
    }
}

/// XYZ tile template with `{x}`, `{y}` and `{z}` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct XyzSource {
    pub template: String,
}

impl XyzSource {
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    pub fn tile_url(&self, x: u32, y: u32, z: u8) -> String {
        self.template
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
            .replace("{z}", &z.to_string())
    }
}

/// Where a layer's data comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceDescriptor {
    Feature(FeatureRequest),
    Tile(TileRequest),
    Xyz(XyzSource),
    /// Client-side data only (e.g. the user marker); nothing is fetched.
    Local,
}

impl SourceDescriptor {
    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            SourceDescriptor::Feature(req) => req.qualified_name(),
            SourceDescriptor::Tile(req) => req.layer_name.clone(),
            SourceDescriptor::Xyz(xyz) => xyz.template.clone(),
            SourceDescriptor::Local => "local".to_string(),
        }
    }
}

/// Raster point query: `{workspace, layer, lon, lat, small bbox}`.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterPointQuery {
    pub endpoint: String,
    pub workspace: String,
    pub layer: String,
    pub at: LonLat,
    pub half_width: f64,
}

impl RasterPointQuery {
    pub fn new(endpoint: &str, workspace: &str, layer: &str, at: LonLat) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            workspace: workspace.to_string(),
            layer: layer.to_string(),
            at,
            half_width: POINT_QUERY_HALF_WIDTH,
        }
    }

    /// WMS `GetFeatureInfo` over a one-pixel window centred on the point.
    pub fn url(&self) -> Result<String, SourceError> {
        let base = format!("{}/{}/wms", trim_endpoint(&self.endpoint), self.workspace);
        let qualified = format!("{}:{}", self.workspace, self.layer);
        let bbox = Extent::around(self.at, self.half_width);
        let params = vec![
            ("SERVICE".to_string(), "WMS".to_string()),
            ("VERSION".to_string(), "1.1.1".to_string()),
            ("REQUEST".to_string(), "GetFeatureInfo".to_string()),
            ("LAYERS".to_string(), qualified.clone()),
            ("QUERY_LAYERS".to_string(), qualified),
            ("INFO_FORMAT".to_string(), GEOJSON_FORMAT.to_string()),
            ("SRS".to_string(), "EPSG:4326".to_string()),
            ("BBOX".to_string(), bbox.to_bbox_param()),
            ("WIDTH".to_string(), "1".to_string()),
            ("HEIGHT".to_string(), "1".to_string()),
            ("X".to_string(), "0".to_string()),
            ("Y".to_string(), "0".to_string()),
        ];
        build_url(&base, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEOSERVER: &str = "https://geoserver.example.org/geoserver/";

    #[test]
    fn test_feature_request_url() {
        let req = FeatureRequest::new(GEOSERVER, "resources", "settlement_12_bhilwara_mandalgarh");
        let url = req.url().unwrap();

        assert!(url.starts_with("https://geoserver.example.org/geoserver/resources/ows?"));
        assert!(url.contains("request=GetFeature"));
        assert!(url.contains("typeName=resources%3Asettlement_12_bhilwara_mandalgarh"));
        assert!(url.contains("outputFormat=application%2Fjson"));
    }

    #[test]
    fn test_feature_request_filters_appended() {
        let req = FeatureRequest::new(GEOSERVER, "works", "plan_gw_1_a_b")
            .with_filter("CQL_FILTER", "status='approved'");
        let url = req.url().unwrap();
        assert!(url.contains("CQL_FILTER=status%3D%27approved%27"));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let req = FeatureRequest::new("not a url", "resources", "x");
        assert!(matches!(req.url(), Err(SourceError::InvalidUrl { .. })));
    }

    #[test]
    fn test_tile_request_params() {
        let req = TileRequest::new(GEOSERVER, "clart:bhilwara_mandalgarh_clart");
        assert_eq!(req.base_url(), "https://geoserver.example.org/geoserver/wms");

        let params = req.params();
        assert!(params.contains(&("TILED".to_string(), "true".to_string())));
        assert!(params.contains(&("STYLES".to_string(), String::new())));

        let url = req.tile_url(&Extent::new(0.0, 0.0, 1.0, 1.0), 256).unwrap();
        assert!(url.contains("WIDTH=256"));
    }

    #[test]
    fn test_xyz_template() {
        let xyz = XyzSource::new("https://tiles.example.org/{z}/{x}/{y}.png");
        assert_eq!(xyz.tile_url(3, 5, 7), "https://tiles.example.org/7/3/5.png");
    }

    #[test]
    fn test_point_query_window() {
        let query = RasterPointQuery::new(GEOSERVER, "terrain", "a_b_terrain_raster", LonLat::new(75.0, 25.0));
        let url = query.url().unwrap();
        assert!(url.contains("REQUEST=GetFeatureInfo"));
        assert!(url.contains("QUERY_LAYERS=terrain%3Aa_b_terrain_raster"));
        assert!(url.contains("WIDTH=1"));
    }
}
