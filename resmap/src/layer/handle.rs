//! The shared layer handle.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;

use super::feature::Feature;
use super::types::{LayerId, LayerKind, SlotKey, ZRank};
use crate::coord::Extent;
use crate::load::{LoadState, LoadStateCell, TileLoadTracker};
use crate::source::SourceDescriptor;
use crate::style::{Style, StyleDescriptor};

/// Shared handle to a layer instance.
pub type LayerHandle = Arc<Layer>;

#[derive(Debug)]
struct LayerState {
    style: Style,
    opacity: f32,
    visible: bool,
    z_rank: ZRank,
    features: Arc<Vec<Feature>>,
}

/// One live layer instance.
///
/// Identity and source are fixed at creation. Display state (style,
/// opacity, visibility, z-rank) and the loaded features are mutated in
/// place behind a mutex so the handle can be attached to the surface before
/// any data has arrived.
#[derive(Debug)]
pub struct Layer {
    id: LayerId,
    key: SlotKey,
    kind: LayerKind,
    source: SourceDescriptor,
    load_state: LoadStateCell,
    tiles: Option<TileLoadTracker>,
    state: Mutex<LayerState>,
}

impl Layer {
    /// Create a layer with no features and full opacity.
    pub fn new(
        key: SlotKey,
        kind: LayerKind,
        source: SourceDescriptor,
        style: Style,
        load_state: LoadStateCell,
    ) -> Self {
        Self {
            id: LayerId::next(),
            key,
            kind,
            source,
            load_state,
            tiles: None,
            state: Mutex::new(LayerState {
                style,
                opacity: 1.0,
                visible: true,
                z_rank: 0,
                features: Arc::new(Vec::new()),
            }),
        }
    }

    /// Attach the tile tracker the rendering engine reports tile events to.
    pub fn with_tile_tracker(mut self, tracker: TileLoadTracker) -> Self {
        self.tiles = Some(tracker);
        self
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn key(&self) -> SlotKey {
        self.key
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn source(&self) -> &SourceDescriptor {
        &self.source
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state.get()
    }

    /// Wait until this instance leaves `Pending`.
    ///
    /// Unlike the creator's [`crate::load::LoadCompletion`] this can be
    /// awaited by anyone holding the handle, any number of times.
    pub fn settled(&self) -> impl Future<Output = LoadState> + Send + 'static {
        let cell = self.load_state.clone();
        async move { cell.settled().await }
    }

    /// Tile event sink for raster layers; `None` for feature layers.
    pub fn tiles(&self) -> Option<&TileLoadTracker> {
        self.tiles.as_ref()
    }

    pub fn style(&self) -> Style {
        self.state.lock().style.clone()
    }

    pub fn set_style(&self, style: Style) {
        self.state.lock().style = style;
    }

    /// Evaluate the current style for one feature.
    pub fn resolve_style(&self, feature: &Feature) -> StyleDescriptor {
        let style = self.style();
        style.resolve(feature)
    }

    pub fn opacity(&self) -> f32 {
        self.state.lock().opacity
    }

    /// Set opacity, clamped to `[0, 1]`.
    pub fn set_opacity(&self, opacity: f32) {
        self.state.lock().opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn visible(&self) -> bool {
        self.state.lock().visible
    }

    pub fn set_visible(&self, visible: bool) {
        self.state.lock().visible = visible;
    }

    pub fn z_rank(&self) -> ZRank {
        self.state.lock().z_rank
    }

    pub fn set_z_rank(&self, z_rank: ZRank) {
        self.state.lock().z_rank = z_rank;
    }

    /// Snapshot of the loaded features.
    pub fn features(&self) -> Arc<Vec<Feature>> {
        Arc::clone(&self.state.lock().features)
    }

    pub fn feature_count(&self) -> usize {
        self.state.lock().features.len()
    }

    /// Replace the feature set wholesale.
    pub fn set_features(&self, features: Vec<Feature>) {
        self.state.lock().features = Arc::new(features);
    }

    /// Extent of all loaded features, if any have geometry.
    pub fn extent(&self) -> Option<Extent> {
        self.features()
            .iter()
            .filter_map(Feature::extent)
            .reduce(|a, b| a.merge(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::LonLat;
    use crate::layer::{Geometry, Properties};
    use crate::source::SourceDescriptor;

    fn make_layer() -> Layer {
        Layer::new(
            SlotKey::Settlement,
            LayerKind::PointFeature,
            SourceDescriptor::Local,
            Style::default(),
            LoadStateCell::new(),
        )
    }

    #[test]
    fn test_new_layer_defaults() {
        let layer = make_layer();
        assert_eq!(layer.key(), SlotKey::Settlement);
        assert_eq!(layer.opacity(), 1.0);
        assert!(layer.visible());
        assert_eq!(layer.feature_count(), 0);
        assert_eq!(layer.load_state(), LoadState::Pending);
        assert!(layer.tiles().is_none());
        assert!(layer.extent().is_none());
    }

    #[test]
    fn test_opacity_clamped() {
        let layer = make_layer();
        layer.set_opacity(1.7);
        assert_eq!(layer.opacity(), 1.0);
        layer.set_opacity(-0.2);
        assert_eq!(layer.opacity(), 0.0);
    }

    #[test]
    fn test_extent_covers_all_features() {
        let layer = make_layer();
        layer.set_features(vec![
            Feature::new(Some(Geometry::point(LonLat::new(1.0, 1.0))), Properties::new()),
            Feature::new(Some(Geometry::point(LonLat::new(3.0, 2.0))), Properties::new()),
            Feature::new(None, Properties::new()),
        ]);
        assert_eq!(layer.extent(), Some(Extent::new(1.0, 1.0, 3.0, 2.0)));
    }

    #[test]
    fn test_instances_have_distinct_ids() {
        assert_ne!(make_layer().id(), make_layer().id());
    }
}
