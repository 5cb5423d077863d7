//! Style descriptor and resolver trait.

use std::fmt;
use std::sync::Arc;

use crate::layer::Feature;

/// RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREY: Color = Color::rgb(128, 128, 128);
    pub const HIGHLIGHT: Color = Color::rgb(0, 255, 255);

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Outline style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Visual style of one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDescriptor {
    /// Icon asset for point features.
    pub icon: Option<&'static str>,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
    pub text: Option<String>,
    pub scale: f32,
    pub visible: bool,
}

impl Default for StyleDescriptor {
    fn default() -> Self {
        Self {
            icon: None,
            fill: None,
            stroke: Some(Stroke::new(Color::GREY, 1.0)),
            text: None,
            scale: 1.0,
            visible: true,
        }
    }
}

impl StyleDescriptor {
    pub fn icon(icon: &'static str) -> Self {
        Self {
            icon: Some(icon),
            stroke: None,
            ..Self::default()
        }
    }

    pub fn filled(fill: Color, stroke: Stroke) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(stroke),
            ..Self::default()
        }
    }

    pub fn outline(stroke: Stroke) -> Self {
        Self {
            stroke: Some(stroke),
            ..Self::default()
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// Pure mapping from feature attributes to a style.
///
/// Implementations must not block, touch the network or panic on
/// unexpected attribute values.
pub trait StyleResolver: Send + Sync + fmt::Debug {
    fn resolve(&self, feature: &Feature) -> StyleDescriptor;
}

/// A layer's style: fixed, or computed per feature.
#[derive(Debug, Clone)]
pub enum Style {
    Static(StyleDescriptor),
    Resolver(Arc<dyn StyleResolver>),
}

impl Style {
    pub fn resolver<R: StyleResolver + 'static>(resolver: R) -> Self {
        Style::Resolver(Arc::new(resolver))
    }

    pub fn resolve(&self, feature: &Feature) -> StyleDescriptor {
        match self {
            Style::Static(descriptor) => descriptor.clone(),
            Style::Resolver(resolver) => resolver.resolve(feature),
        }
    }

    /// The style as a resolver, for wrapping in another resolver.
    pub fn to_resolver(&self) -> Arc<dyn StyleResolver> {
        match self {
            Style::Static(descriptor) => Arc::new(descriptor.clone()),
            Style::Resolver(resolver) => Arc::clone(resolver),
        }
    }
}

/// A descriptor resolves to itself for every feature.
impl StyleResolver for StyleDescriptor {
    fn resolve(&self, _feature: &Feature) -> StyleDescriptor {
        self.clone()
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::Static(StyleDescriptor::default())
    }
}
