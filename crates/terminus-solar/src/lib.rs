//! Subsolar point computation: where on Earth the sun stands at the zenith.
//!
//! The model is an analytic approximation of Earth's orbit (mean motion,
//! eccentricity and axial tilt) with an equation-of-time correction. It is
//! accurate to well under a degree, which is plenty for drawing a terminator
//! on a map.

mod geo;
mod subsolar;

pub use geo::{GeoPoint, wrap_longitude};
pub use subsolar::{
    AXIAL_TILT_DEG, MEAN_DAILY_MOTION, ORBITAL_ECCENTRICITY, day_of_year_fraction,
    equation_of_time_minutes, subsolar_point, subsolar_point_at, subsolar_point_from_epoch_millis,
    subsolar_point_now, utc_hours,
};
