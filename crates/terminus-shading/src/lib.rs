//! Day/night shading: solar altitude, twilight banding, and overlay color.
//!
//! Everything here is plain scalar math so the same model can run per
//! fragment on the GPU (see the WGSL transliteration in `terminus-layer`) or
//! in a CPU batch over a grid.

mod color;
mod illumination;
mod params;
mod raster;

pub use color::{Rgba8, premultiply, to_straight_rgba8};
pub use illumination::{
    TWILIGHT_BEGINS_DEG, TWILIGHT_STEP_ANGLE_DEG, illuminate, shade, solar_altitude,
    twilight_level,
};
pub use params::{ShadingParameters, TwilightParams};
pub use raster::shade_equirect;
