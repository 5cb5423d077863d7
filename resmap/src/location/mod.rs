//! Device position.
//!
//! The [`LocationSource`] trait abstracts over where the user's position
//! comes from:
//!
//! - [`LocalEndpointSource`]: a JSON endpoint served on the device
//! - [`FixedLocation`]: a configured position
//! - [`FallbackLocation`]: try one source, then another

mod error;
mod provider;

pub use error::LocationError;
pub use provider::{FallbackLocation, FixedLocation, LocalEndpointSource, LocationSource};
