//! Style resolvers.
//!
//! A style resolver is a pure, synchronous function from a feature's
//! attributes to a [`StyleDescriptor`]. Resolvers encode the domain's
//! classification rules (asset icons, groundwater trend colours, which
//! work types show on which screen) and never fail: unknown keys and
//! missing attributes fall back to a default descriptor.
//!
//! [`style_for`] picks the resolver for a slot on a given screen. The same
//! resolvers serve the initial load and the refresh after a form
//! submission.

mod icons;
mod registry;
mod selection;
mod trend;
mod types;
mod visibility;

pub use icons::{AssetClass, AssetIconResolver, GENERIC_ICON};
pub use registry::style_for;
pub use selection::{ClickMatchResolver, PolygonSelectionResolver, DEFAULT_CLICK_TOLERANCE};
pub use trend::{TrendBucket, TrendColorResolver, WELL_DEPTH_TREND_KEYS};
pub use types::{Color, Stroke, Style, StyleDescriptor, StyleResolver};
pub use visibility::{visible_on, ScreenFilterResolver};
