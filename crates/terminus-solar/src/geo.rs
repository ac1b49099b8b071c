//! Geographic coordinates in degrees.

use serde::{Deserialize, Serialize};

/// A point on the Earth's surface.
///
/// Longitude is in `(-180, 180]`, latitude in `[-90, 90]`, both in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees, positive east.
    pub longitude: f64,
    /// Latitude in degrees, positive north.
    pub latitude: f64,
}

impl GeoPoint {
    /// Create a new point from longitude and latitude in degrees.
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// A point whose coordinates are both NaN.
    ///
    /// Returned for timestamps that cannot be evaluated.
    pub const fn nan() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite()
    }

    /// Longitude in radians.
    pub fn longitude_rad(&self) -> f64 {
        self.longitude.to_radians()
    }

    /// Latitude in radians.
    pub fn latitude_rad(&self) -> f64 {
        self.latitude.to_radians()
    }
}

/// Wrap a longitude in degrees into `(-180, 180]`.
///
/// Non-finite input is returned unchanged.
pub fn wrap_longitude(longitude: f64) -> f64 {
    if !longitude.is_finite() {
        return longitude;
    }
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}
