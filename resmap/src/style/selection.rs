//! Styles that mark the current selection.

use std::sync::Arc;

use super::trend::TrendColorResolver;
use super::types::{Color, Stroke, StyleDescriptor, StyleResolver};
use crate::coord::LonLat;
use crate::layer::Feature;

/// Distance in degrees within which a point counts as "at" a click.
pub const DEFAULT_CLICK_TOLERANCE: f64 = 0.0002;

/// Highlights one polygon and recolours its siblings by trend bucket.
#[derive(Debug, Clone)]
pub struct PolygonSelectionResolver {
    selected_id: String,
    siblings: TrendColorResolver,
}

impl PolygonSelectionResolver {
    pub fn new(selected_id: &str, siblings: TrendColorResolver) -> Self {
        Self {
            selected_id: selected_id.to_string(),
            siblings,
        }
    }

    pub fn selected_id(&self) -> &str {
        &self.selected_id
    }
}

impl StyleResolver for PolygonSelectionResolver {
    fn resolve(&self, feature: &Feature) -> StyleDescriptor {
        let mut style = self.siblings.resolve(feature);
        if feature.id_string().as_deref() == Some(self.selected_id.as_str()) {
            style.fill = Some(Color::rgba(0, 255, 255, 120));
            style.stroke = Some(Stroke::new(Color::HIGHLIGHT, 3.0));
        }
        style
    }
}

/// Highlights the point feature located at a click coordinate.
///
/// Used when a layer is refetched after a form submission, so the asset
/// the user just surveyed stays marked.
#[derive(Debug, Clone)]
pub struct ClickMatchResolver {
    inner: Arc<dyn StyleResolver>,
    at: LonLat,
    tolerance: f64,
}

impl ClickMatchResolver {
    pub fn new(inner: Arc<dyn StyleResolver>, at: LonLat) -> Self {
        Self {
            inner,
            at,
            tolerance: DEFAULT_CLICK_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn at(&self) -> LonLat {
        self.at
    }

    pub fn matches(&self, feature: &Feature) -> bool {
        feature
            .anchor()
            .is_some_and(|p| p.degree_distance(&self.at) <= self.tolerance)
    }
}

impl StyleResolver for ClickMatchResolver {
    fn resolve(&self, feature: &Feature) -> StyleDescriptor {
        let style = self.inner.resolve(feature);
        if self.matches(feature) {
            StyleDescriptor {
                stroke: Some(Stroke::new(Color::HIGHLIGHT, 2.0)),
                ..style
            }
            .with_scale(1.5)
        } else {
            style
        }
    }
}
