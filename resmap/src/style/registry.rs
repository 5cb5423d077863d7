//! Slot → style mapping.

use std::sync::Arc;

use super::icons::{AssetClass, AssetIconResolver};
use super::trend::TrendColorResolver;
use super::types::{Color, Stroke, Style, StyleDescriptor, StyleResolver};
use super::visibility::ScreenFilterResolver;
use crate::layer::SlotKey;
use crate::navigation::Screen;

fn works(screen: Screen) -> Style {
    let inner: Arc<dyn StyleResolver> = Arc::new(AssetIconResolver::new(AssetClass::Work));
    Style::resolver(ScreenFilterResolver::new(inner, screen))
}

fn icons(class: AssetClass) -> Style {
    Style::resolver(AssetIconResolver::new(class))
}

/// The style a slot's layer uses on `screen`.
pub fn style_for(key: SlotKey, screen: Screen) -> Style {
    match key {
        SlotKey::BaseImagery | SlotKey::Clart | SlotKey::Lulc | SlotKey::Terrain => {
            Style::Static(StyleDescriptor {
                stroke: None,
                ..StyleDescriptor::default()
            })
        }
        SlotKey::AdminBoundary => Style::Static(StyleDescriptor::outline(Stroke::new(
            Color::BLACK,
            2.0,
        ))),
        SlotKey::UserMarker => icons(AssetClass::UserLocation),
        SlotKey::Settlement => icons(AssetClass::Settlement),
        SlotKey::Well => icons(AssetClass::Well),
        SlotKey::WaterStructure => icons(AssetClass::Waterbody),
        SlotKey::Cropping => icons(AssetClass::Cropping),
        SlotKey::NregaAssets => icons(AssetClass::NregaAsset),
        SlotKey::RechargeWorks | SlotKey::IrrigationWorks | SlotKey::LivelihoodWorks => {
            works(screen)
        }
        SlotKey::WellDepth => Style::resolver(TrendColorResolver::default()),
        SlotKey::Fortnight => Style::Static(StyleDescriptor::filled(
            Color::rgba(30, 144, 255, 60),
            Stroke::new(Color::rgb(30, 144, 255), 1.0),
        )),
        SlotKey::Drainage => Style::Static(StyleDescriptor::outline(Stroke::new(
            Color::rgb(0, 0, 205),
            1.5,
        ))),
        SlotKey::SurfaceWaterBodies => Style::Static(StyleDescriptor::filled(
            Color::rgba(100, 149, 237, 140),
            Stroke::new(Color::rgb(0, 0, 139), 1.0),
        )),
        SlotKey::CroppingIntensity => Style::Static(StyleDescriptor::filled(
            Color::rgba(34, 139, 34, 120),
            Stroke::new(Color::rgb(0, 100, 0), 1.0),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{Feature, Properties};
    use serde_json::json;

    #[test]
    fn test_every_slot_resolves_without_panicking() {
        let empty = Feature::new(None, Properties::new());
        for key in SlotKey::ALL {
            for screen in Screen::ALL {
                let _ = style_for(key, screen).resolve(&empty);
            }
        }
    }

    #[test]
    fn test_works_style_depends_on_screen() {
        let mut props = Properties::new();
        props.insert("work_type".into(), json!("canal"));
        let canal = Feature::new(None, props);

        assert!(style_for(SlotKey::IrrigationWorks, Screen::Agriculture)
            .resolve(&canal)
            .visible);
        assert!(!style_for(SlotKey::IrrigationWorks, Screen::Livelihood)
            .resolve(&canal)
            .visible);
    }
}
