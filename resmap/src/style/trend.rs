//! Groundwater trend colouring.
//!
//! Well-depth change is bucketed on a four-step ladder with breakpoints at
//! −5, −1 and +1 metres:
//!
//! ```text
//!   v < -5        SharpDecline  red
//!  -5 <= v < -1   Decline       orange
//!  -1 <= v <= 1   Stable        yellow
//!   v > 1         Rising        green
//! ```

use super::types::{Color, Stroke, StyleDescriptor, StyleResolver};
use crate::layer::Feature;

/// Attribute names carrying the well-depth change of a micro-watershed.
pub const WELL_DEPTH_TREND_KEYS: &[&str] = &["Net2018_23", "net_change", "well_depth_change"];

/// Trend bucket of a well-depth change value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TrendBucket {
    SharpDecline,
    Decline,
    Stable,
    Rising,
}

impl TrendBucket {
    pub fn classify(value: f64) -> Option<TrendBucket> {
        if !value.is_finite() {
            return None;
        }
        Some(if value < -5.0 {
            TrendBucket::SharpDecline
        } else if value < -1.0 {
            TrendBucket::Decline
        } else if value <= 1.0 {
            TrendBucket::Stable
        } else {
            TrendBucket::Rising
        })
    }

    pub fn color(&self) -> Color {
        match self {
            TrendBucket::SharpDecline => Color::rgba(255, 0, 0, 160),
            TrendBucket::Decline => Color::rgba(255, 165, 0, 160),
            TrendBucket::Stable => Color::rgba(255, 255, 0, 160),
            TrendBucket::Rising => Color::rgba(0, 200, 0, 160),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendBucket::SharpDecline => "Declining sharply",
            TrendBucket::Decline => "Declining",
            TrendBucket::Stable => "Stable",
            TrendBucket::Rising => "Recharging",
        }
    }
}

/// Colours polygons by their groundwater trend bucket.
#[derive(Debug, Clone, Copy)]
pub struct TrendColorResolver {
    keys: &'static [&'static str],
}

impl TrendColorResolver {
    pub fn new(keys: &'static [&'static str]) -> Self {
        Self { keys }
    }

    /// Bucket of the feature's trend attribute, if it has a numeric one.
    pub fn bucket(&self, feature: &Feature) -> Option<TrendBucket> {
        feature
            .number_property(self.keys)
            .and_then(TrendBucket::classify)
    }
}

impl Default for TrendColorResolver {
    fn default() -> Self {
        Self::new(WELL_DEPTH_TREND_KEYS)
    }
}

impl StyleResolver for TrendColorResolver {
    fn resolve(&self, feature: &Feature) -> StyleDescriptor {
        match self.bucket(feature) {
            Some(bucket) => StyleDescriptor::filled(bucket.color(), Stroke::new(Color::BLACK, 1.0)),
            None => StyleDescriptor::default(),
        }
    }
}
