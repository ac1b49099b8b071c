//! Overlay geometry for flat (Web Mercator) and globe map projections.
//!
//! Under a flat projection the overlay is a single quad spanning the visible
//! world copies; under a globe it is a tessellated unit sphere. Geometry is
//! cached behind a [`GeometrySignature`] so it is only rebuilt when the
//! projection or the integer span of visible world copies changes.

mod buffers;
mod cache;
mod error;
mod flat;
mod globe;
mod projection;
mod signature;

pub use buffers::{MeshBuffers, MeshVertices};
pub use cache::{GeometryCache, build_geometry};
pub use error::GeometryError;
pub use flat::build_flat_quad;
pub use globe::{
    DEFAULT_GLOBE_GRANULARITY, MAX_GLOBE_GRANULARITY, MAX_MERCATOR_LATITUDE, build_globe_mesh,
    lng_lat_to_unit_sphere,
};
pub use projection::{ProjectionMode, ViewportBounds, mercator_x};
pub use signature::GeometrySignature;
