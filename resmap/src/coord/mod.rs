//! Geographic coordinate types.
//!
//! All coordinates handled by the engine are WGS84 longitude/latitude pairs
//! (`EPSG:4326`). Projection to screen space is the rendering engine's job;
//! the engine only needs points, extents and the odd containment test.

mod types;

pub use types::{point_in_ring, Extent, LonLat, Pixel};

#[cfg(test)]
mod tests;
