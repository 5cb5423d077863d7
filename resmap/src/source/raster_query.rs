//! Single-pixel raster attribute lookups.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::error::SourceError;
use super::http::AsyncHttpClient;
use super::request::RasterPointQuery;
use crate::coord::LonLat;
use crate::layer::{FeatureCollection, Properties};

/// Attribute values of one raster pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterValue {
    pub workspace: String,
    pub layer: String,
    pub at: LonLat,
    pub properties: Properties,
}

impl RasterValue {
    /// The band value, under the names the tile server uses for it.
    pub fn band_value(&self) -> Option<f64> {
        ["GRAY_INDEX", "value", "Band1"]
            .iter()
            .filter_map(|k| self.properties.get(*k))
            .find_map(Value::as_f64)
    }
}

/// Issues raster point queries (site suitability, terrain, land use).
pub struct RasterQueryClient<C> {
    client: Arc<C>,
    endpoint: String,
}

impl<C: AsyncHttpClient> RasterQueryClient<C> {
    pub fn new(client: Arc<C>, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    /// Query the pixel under `at`.
    ///
    /// Returns `Ok(None)` when the point lies outside the raster (the server
    /// answers with an empty collection).
    pub async fn query(
        &self,
        workspace: &str,
        layer: &str,
        at: LonLat,
    ) -> Result<Option<RasterValue>, SourceError> {
        let url = RasterPointQuery::new(&self.endpoint, workspace, layer, at).url()?;
        let body = self.client.get(&url).await?;
        let collection = FeatureCollection::from_slice(&body)
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

        debug!(
            workspace = workspace,
            layer = layer,
            hits = collection.features.len(),
            "Raster point query answered"
        );

        Ok(collection.features.into_iter().next().map(|f| RasterValue {
            workspace: workspace.to_string(),
            layer: layer.to_string(),
            at,
            properties: f.properties,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::http::tests::MockHttpClient;
    use serde_json::json;

    #[tokio::test]
    async fn test_query_returns_first_pixel() {
        let mock = MockHttpClient::new();
        mock.route_json(
            "GetFeatureInfo",
            json!({"type": "FeatureCollection", "features": [
                {"type": "Feature", "geometry": null, "properties": {"GRAY_INDEX": 3.0}}
            ]}),
        );
        let client = RasterQueryClient::new(Arc::new(mock), "https://geo.example.org/geoserver");

        let value = client
            .query("clart", "a_b_clart", LonLat::new(75.0, 25.0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(value.band_value(), Some(3.0));
    }

    #[tokio::test]
    async fn test_query_outside_raster_is_none() {
        let mock = MockHttpClient::new();
        mock.route_json("GetFeatureInfo", json!({"type": "FeatureCollection", "features": []}));
        let client = RasterQueryClient::new(Arc::new(mock), "https://geo.example.org/geoserver");

        let value = client
            .query("terrain", "t", LonLat::new(75.0, 25.0))
            .await
            .unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_query_bad_body_is_invalid_response() {
        let mock = MockHttpClient::new();
        mock.route("GetFeatureInfo", Ok(b"ServiceException".to_vec()));
        let client = RasterQueryClient::new(Arc::new(mock), "https://geo.example.org/geoserver");

        let result = client.query("lulc", "l", LonLat::new(75.0, 25.0)).await;
        assert!(matches!(result, Err(SourceError::InvalidResponse(_))));
    }
}
