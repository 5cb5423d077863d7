//! Per-screen visibility of planned works.
//!
//! Each work type belongs to a fixed set of screens. Types not in the
//! allow-list stay visible everywhere.

use std::sync::Arc;

use super::icons::structure_type;
use super::types::{StyleDescriptor, StyleResolver};
use crate::layer::Feature;
use crate::navigation::Screen;

const ALLOW_LIST: &[(&str, &[Screen])] = &[
    ("check dam", &[Screen::Groundwater, Screen::SurfaceWater]),
    (
        "farm pond",
        &[Screen::Groundwater, Screen::SurfaceWater, Screen::Agriculture],
    ),
    ("percolation tank", &[Screen::Groundwater]),
    ("loose boulder structure", &[Screen::Groundwater]),
    ("trench cum bund", &[Screen::Groundwater]),
    ("earthen gully plug", &[Screen::Groundwater]),
    ("community pond", &[Screen::Groundwater, Screen::SurfaceWater]),
    ("diversion drains", &[Screen::SurfaceWater, Screen::Agriculture]),
    ("canal", &[Screen::Agriculture]),
    ("farm bund", &[Screen::Agriculture]),
    ("well", &[Screen::Agriculture, Screen::Groundwater]),
    ("livestock", &[Screen::Livelihood]),
    ("fisheries", &[Screen::Livelihood]),
    ("plantation", &[Screen::Livelihood, Screen::Agriculture]),
];

/// Whether a work of `structure_type` shows on `screen`.
///
/// The home and resource-mapping screens show everything.
pub fn visible_on(structure_type: &str, screen: Screen) -> bool {
    if matches!(screen, Screen::HomeScreen | Screen::ResourceMapping) {
        return true;
    }
    ALLOW_LIST
        .iter()
        .find(|(kind, _)| *kind == structure_type)
        .map(|(_, screens)| screens.contains(&screen))
        .unwrap_or(true)
}

/// Wraps a resolver and hides features not allowed on the screen.
#[derive(Debug, Clone)]
pub struct ScreenFilterResolver {
    inner: Arc<dyn StyleResolver>,
    screen: Screen,
}

impl ScreenFilterResolver {
    pub fn new(inner: Arc<dyn StyleResolver>, screen: Screen) -> Self {
        Self { inner, screen }
    }
}

impl StyleResolver for ScreenFilterResolver {
    fn resolve(&self, feature: &Feature) -> StyleDescriptor {
        let mut style = self.inner.resolve(feature);
        if let Some(kind) = structure_type(feature) {
            if !visible_on(&kind, self.screen) {
                style.visible = false;
            }
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Properties;
    use crate::style::{AssetClass, AssetIconResolver};
    use serde_json::json;

    fn work(kind: &str) -> Feature {
        let mut props = Properties::new();
        props.insert("work_type".into(), json!(kind));
        Feature::new(None, props)
    }

    #[test]
    fn test_allow_list() {
        assert!(visible_on("canal", Screen::Agriculture));
        assert!(!visible_on("canal", Screen::Groundwater));
        assert!(visible_on("canal", Screen::ResourceMapping));
        assert!(visible_on("unknown work", Screen::Livelihood));
    }

    #[test]
    fn test_filter_hides_disallowed() {
        let inner: Arc<dyn StyleResolver> = Arc::new(AssetIconResolver::new(AssetClass::Work));
        let groundwater = ScreenFilterResolver::new(Arc::clone(&inner), Screen::Groundwater);
        let livelihood = ScreenFilterResolver::new(inner, Screen::Livelihood);

        assert!(groundwater.resolve(&work("Check Dam")).visible);
        assert!(!livelihood.resolve(&work("Check Dam")).visible);
        assert!(livelihood.resolve(&work("Fisheries")).visible);
    }
}
