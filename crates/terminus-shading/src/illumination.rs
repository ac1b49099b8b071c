//! Brightness model: solar altitude to a day/night mix factor.

use glam::Vec4;
use terminus_solar::GeoPoint;

use crate::color::premultiply;
use crate::params::{ShadingParameters, TwilightParams};

/// Degrees of solar depression per twilight band.
pub const TWILIGHT_STEP_ANGLE_DEG: f64 = 6.0;

/// Solar altitude at sunrise/sunset, accounting for the apparent solar radius
/// and standard refraction.
pub const TWILIGHT_BEGINS_DEG: f64 = -0.8333;

/// Altitude of the sun above the observer's horizon, in degrees.
pub fn solar_altitude(observer: GeoPoint, subsolar: GeoPoint) -> f64 {
    let obs_lat = observer.latitude_rad();
    let sub_lat = subsolar.latitude_rad();
    let hour_angle = subsolar.longitude_rad() - observer.longitude_rad();

    (obs_lat.sin() * sub_lat.sin() + obs_lat.cos() * sub_lat.cos() * hour_angle.cos())
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees()
}

/// Twilight level for a solar altitude: 0 at the terminator, growing by one
/// per [`TWILIGHT_STEP_ANGLE_DEG`] into the night side.
///
/// With `steps > 0` the level is quantized to `0..=steps`, and anything above
/// [`TWILIGHT_BEGINS_DEG`] is pinned to 0 so the sunrise/sunset band still
/// renders as daylight. Otherwise the level is continuous and negative on the
/// day side.
pub fn twilight_level(altitude: f64, steps: i32) -> f64 {
    let level = -altitude / TWILIGHT_STEP_ANGLE_DEG;
    if steps <= 0 {
        return level;
    }
    if altitude > TWILIGHT_BEGINS_DEG {
        return 0.0;
    }
    level.clamp(0.0, steps as f64).ceil()
}

/// Brightness at `observer`: 1 for full daylight, 0 for full night.
pub fn illuminate(observer: GeoPoint, subsolar: GeoPoint, params: TwilightParams) -> f64 {
    let level = twilight_level(solar_altitude(observer, subsolar), params.steps);
    let base = (1.0 - params.attenuation).clamp(0.0, 1.0);
    // Clamp after pow: on the day side the exponent is negative and the
    // result exceeds 1.
    base.powf(level).clamp(0.0, 1.0)
}

/// Final premultiplied overlay color at `observer`.
///
/// Night and day colors are premultiplied before mixing; opacity is applied
/// to the mixed result.
pub fn shade(observer: GeoPoint, subsolar: GeoPoint, params: &ShadingParameters) -> Vec4 {
    let brightness = illuminate(observer, subsolar, params.twilight()) as f32;
    let night = premultiply(params.night_color);
    let day = premultiply(params.daytime_color);
    night.lerp(day, brightness) * params.opacity as f32
}
