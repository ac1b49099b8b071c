//! Timestamp to subsolar point.

use std::f64::consts::{PI, TAU};

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::geo::{GeoPoint, wrap_longitude};

/// Mean daily angular motion of the Earth along its orbit, in radians per day.
pub const MEAN_DAILY_MOTION: f64 = TAU / 365.24;

/// Obliquity of the ecliptic, in degrees.
pub const AXIAL_TILT_DEG: f64 = 23.44;

/// Eccentricity of the Earth's orbit.
pub const ORBITAL_ECCENTRICITY: f64 = 0.0167;

const SECONDS_PER_DAY: f64 = 86_400.0;
const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Fractional days elapsed since 00:00 UTC on January 1st of the timestamp's year.
pub fn day_of_year_fraction(timestamp: &DateTime<Utc>) -> f64 {
    let seconds = timestamp.num_seconds_from_midnight() as f64
        + timestamp.nanosecond() as f64 / NANOS_PER_SECOND;
    timestamp.ordinal0() as f64 + seconds / SECONDS_PER_DAY
}

/// Hours since 00:00 UTC, including minutes, seconds and the sub-second part.
pub fn utc_hours(timestamp: &DateTime<Utc>) -> f64 {
    timestamp.hour() as f64
        + timestamp.minute() as f64 / 60.0
        + timestamp.second() as f64 / 3600.0
        + timestamp.nanosecond() as f64 / (NANOS_PER_SECOND * 3600.0)
}

/// Orbital angles `(A, B)` for a day-of-year fraction.
///
/// `A` is the mean angle since the December solstice, `B` corrects it for
/// orbital eccentricity.
fn orbital_angles(day: f64) -> (f64, f64) {
    let a = (day + 9.0) * MEAN_DAILY_MOTION;
    let b = a + 2.0 * ORBITAL_ECCENTRICITY * ((day - 3.0) * MEAN_DAILY_MOTION).sin();
    (a, b)
}

/// Equation of time in minutes for a day-of-year fraction.
///
/// `C` is not normalized to a single revolution, so the `trunc(C + 0.5)` term
/// is what keeps the result within roughly ±20 minutes.
pub fn equation_of_time_minutes(day: f64) -> f64 {
    let tilt = AXIAL_TILT_DEG.to_radians();
    let (a, b) = orbital_angles(day);
    let c = (a - b.sin().atan2(b.cos() * tilt.cos())) / PI;
    720.0 * (c - (c + 0.5).trunc())
}

/// Compute the subsolar point for a UTC timestamp.
pub fn subsolar_point(timestamp: DateTime<Utc>) -> GeoPoint {
    let tilt = AXIAL_TILT_DEG.to_radians();
    let day = day_of_year_fraction(&timestamp);
    let (_, b) = orbital_angles(day);
    let eot = equation_of_time_minutes(day);

    let longitude = -15.0 * (utc_hours(&timestamp) - 12.0 + eot / 60.0);
    let latitude = ((-tilt).sin() * b.cos()).asin().to_degrees();

    GeoPoint::new(wrap_longitude(longitude), latitude)
}

/// Compute the subsolar point for the current wall-clock time.
pub fn subsolar_point_now() -> GeoPoint {
    subsolar_point(Utc::now())
}

/// Compute the subsolar point for `timestamp`, or for now if it is `None`.
pub fn subsolar_point_at(timestamp: Option<DateTime<Utc>>) -> GeoPoint {
    subsolar_point(timestamp.unwrap_or_else(Utc::now))
}

/// Compute the subsolar point for a Unix timestamp in milliseconds.
///
/// Non-finite or out-of-range input yields [`GeoPoint::nan`] instead of an
/// error; callers validate their timestamps.
pub fn subsolar_point_from_epoch_millis(millis: f64) -> GeoPoint {
    if !millis.is_finite() {
        return GeoPoint::nan();
    }
    let seconds = (millis / 1000.0).floor();
    let nanos = ((millis - seconds * 1000.0) * 1_000_000.0)
        .round()
        .clamp(0.0, NANOS_PER_SECOND - 1.0) as u32;
    match DateTime::from_timestamp(seconds as i64, nanos) {
        Some(timestamp) => subsolar_point(timestamp),
        None => GeoPoint::nan(),
    }
}
