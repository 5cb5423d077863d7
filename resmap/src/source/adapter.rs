//! Layer source adapters: one call creates a layer and its completion.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::catalog::{LayerCatalog, PlanContext};
use super::http::AsyncHttpClient;
use super::request::{FeatureRequest, SourceDescriptor};
use crate::layer::{FeatureCollection, Layer, LayerHandle, LayerKind, SlotKey};
use crate::load::{
    load_channel, LoadCompletion, LoadError, LoadOutcome, LoadSignal, LoadStateCell,
    TileLoadTracker, DEFAULT_FALLBACK_WINDOW,
};
use crate::style::Style;

/// Creates layers for empty cache slots.
///
/// Returns the handle synchronously so it can be attached at once and
/// populate progressively; the paired [`LoadCompletion`] settles when the
/// initial data has arrived.
pub trait LayerFactory: Send + Sync {
    fn create(&self, key: SlotKey, style: Style) -> (LayerHandle, LoadCompletion);
}

/// Production factory backed by the feature and tile services.
pub struct ServiceLayerFactory<C> {
    client: Arc<C>,
    catalog: LayerCatalog,
    plan: PlanContext,
    fallback_window: Duration,
}

impl<C: AsyncHttpClient + 'static> ServiceLayerFactory<C> {
    pub fn new(client: Arc<C>, catalog: LayerCatalog, plan: PlanContext) -> Self {
        Self {
            client,
            catalog,
            plan,
            fallback_window: DEFAULT_FALLBACK_WINDOW,
        }
    }

    /// Override the zero-tile fallback window.
    pub fn with_fallback_window(mut self, window: Duration) -> Self {
        self.fallback_window = window;
        self
    }

    pub fn plan(&self) -> &PlanContext {
        &self.plan
    }

    pub fn catalog(&self) -> &LayerCatalog {
        &self.catalog
    }

    /// Create a layer of `kind` reading from `source`.
    ///
    /// - feature sources: fetch and parse on a spawned task, all or nothing
    /// - tile sources: settle from tile events, or after the fallback window
    ///   if no tile was ever requested
    /// - local sources: settle immediately with nothing requested
    ///
    /// Must be called from within a tokio runtime.
    pub fn create_layer(
        &self,
        key: SlotKey,
        kind: LayerKind,
        source: SourceDescriptor,
        style: Style,
    ) -> (LayerHandle, LoadCompletion) {
        let cell = LoadStateCell::new();
        let layer = Layer::new(key, kind, source.clone(), style, cell.clone());
        let (signal, completion) = load_channel(key, layer.id(), cell);

        debug!(
            slot = %key,
            layer_id = %layer.id(),
            source = %source.describe(),
            "Creating layer"
        );

        match source {
            SourceDescriptor::Feature(request) => {
                let layer = Arc::new(layer);
                self.spawn_feature_fetch(request, Arc::clone(&layer), signal);
                (layer, completion)
            }
            SourceDescriptor::Tile(_) | SourceDescriptor::Xyz(_) => {
                let tracker = TileLoadTracker::new(signal, self.fallback_window);
                (Arc::new(layer.with_tile_tracker(tracker)), completion)
            }
            SourceDescriptor::Local => {
                signal.settle(Ok(LoadOutcome::NothingRequested));
                (Arc::new(layer), completion)
            }
        }
    }

    fn spawn_feature_fetch(&self, request: FeatureRequest, layer: LayerHandle, signal: LoadSignal) {
        let url = match request.url() {
            Ok(url) => url,
            Err(e) => {
                warn!(slot = %layer.key(), error = %e, "Cannot build feature request");
                signal.settle(Err(LoadError::Transport(e.to_string())));
                return;
            }
        };

        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            let result = fetch_features(client.as_ref(), &url, &layer).await;
            match &result {
                Ok(outcome) => debug!(
                    slot = %layer.key(),
                    layer_id = %layer.id(),
                    outcome = ?outcome,
                    "Feature layer loaded"
                ),
                Err(e) => warn!(
                    slot = %layer.key(),
                    layer_id = %layer.id(),
                    url = %url,
                    error = %e,
                    "Feature layer load failed"
                ),
            }
            signal.settle(result);
        });
    }
}

async fn fetch_features<C: AsyncHttpClient>(
    client: &C,
    url: &str,
    layer: &Layer,
) -> Result<LoadOutcome, LoadError> {
    let body = client
        .get(url)
        .await
        .map_err(|e| LoadError::Transport(e.to_string()))?;
    let collection =
        FeatureCollection::from_slice(&body).map_err(|e| LoadError::Parse(e.to_string()))?;
    let count = collection.features.len();
    layer.set_features(collection.features);
    Ok(LoadOutcome::Features { count })
}

impl<C: AsyncHttpClient + 'static> LayerFactory for ServiceLayerFactory<C> {
    fn create(&self, key: SlotKey, style: Style) -> (LayerHandle, LoadCompletion) {
        let source = self.catalog.source_for(key, &self.plan);
        self.create_layer(key, key.kind(), source, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::LoadState;
    use crate::source::http::tests::MockHttpClient;
    use crate::source::SourceError;
    use serde_json::json;

    fn factory(mock: &MockHttpClient) -> ServiceLayerFactory<MockHttpClient> {
        ServiceLayerFactory::new(
            Arc::new(mock.clone()),
            LayerCatalog::new("https://geo.example.org/geoserver"),
            PlanContext::new("7", "Test plan", "Bhilwara", "Mandalgarh"),
        )
    }

    fn two_points() -> serde_json::Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [75.1, 25.1]}, "properties": {}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [75.2, 25.2]}, "properties": {}}
            ]
        })
    }

    #[tokio::test]
    async fn test_feature_layer_loads_all_features() {
        let mock = MockHttpClient::new();
        mock.route_json("settlement_7_bhilwara_mandalgarh", two_points());

        let (layer, completion) = factory(&mock).create(SlotKey::Settlement, Style::default());
        assert_eq!(layer.feature_count(), 0);

        assert_eq!(completion.await, Ok(LoadOutcome::Features { count: 2 }));
        assert_eq!(layer.feature_count(), 2);
        assert_eq!(layer.load_state(), LoadState::Ready);
        assert_eq!(mock.request_count("settlement_7"), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_rejects_with_no_features() {
        let mock = MockHttpClient::new();
        mock.route(
            "waterbody_7",
            Err(SourceError::Status {
                status: 503,
                url: "x".into(),
            }),
        );

        let (layer, completion) = factory(&mock).create(SlotKey::WaterStructure, Style::default());

        assert!(matches!(completion.await, Err(LoadError::Transport(_))));
        assert_eq!(layer.feature_count(), 0);
        assert_eq!(layer.load_state(), LoadState::Failed);
    }

    #[tokio::test]
    async fn test_parse_failure_is_all_or_nothing() {
        let mock = MockHttpClient::new();
        mock.route("well_7", Ok(b"{\"features\": [ {\"geometry\": 12} ]}".to_vec()));

        let (layer, completion) = factory(&mock).create(SlotKey::Well, Style::default());

        assert!(matches!(completion.await, Err(LoadError::Parse(_))));
        assert_eq!(layer.feature_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_raster_layer_gets_tile_tracker() {
        let mock = MockHttpClient::new();
        let (layer, completion) = factory(&mock).create(SlotKey::Clart, Style::default());

        assert!(layer.tiles().is_some());
        assert_eq!(completion.await, Ok(LoadOutcome::NothingRequested));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_local_layer_settles_immediately() {
        let mock = MockHttpClient::new();
        let (layer, completion) = factory(&mock).create(SlotKey::UserMarker, Style::default());

        assert_eq!(completion.await, Ok(LoadOutcome::NothingRequested));
        assert_eq!(layer.kind(), LayerKind::PointFeature);
    }

    #[tokio::test]
    async fn test_vector_overlay_uses_feature_service() {
        let mock = MockHttpClient::new();
        mock.route_json("deltaG_fortnight", two_points());

        let (layer, completion) = factory(&mock).create(SlotKey::Fortnight, Style::default());

        assert_eq!(layer.kind(), LayerKind::HardwareVectorOverlay);
        assert_eq!(completion.await, Ok(LoadOutcome::Features { count: 2 }));
    }
}
