//! Projection modes and the visible longitudinal span.

use std::fmt;
use std::str::FromStr;

use crate::error::GeometryError;

/// How the host map is currently projected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectionMode {
    /// Flat Web Mercator map.
    Flat,
    /// Spherical globe.
    Globe,
}

impl ProjectionMode {
    /// Resolve the host's projection name.
    ///
    /// Unknown names are an error rather than a silent fallback: drawing flat
    /// geometry on a globe (or vice versa) is worse than drawing nothing.
    pub fn from_host_name(name: &str) -> Result<Self, GeometryError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mercator" | "flat" => Ok(Self::Flat),
            "globe" => Ok(Self::Globe),
            _ => Err(GeometryError::UnsupportedProjection {
                name: name.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "mercator",
            Self::Globe => "globe",
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectionMode {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_host_name(s)
    }
}

/// Visible longitudinal span of a flat map, in degrees.
///
/// Longitudes are unwrapped: a viewport showing more than one world copy may
/// report `west_lng < -180` or `east_lng > 180`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportBounds {
    pub west_lng: f64,
    pub east_lng: f64,
}

impl ViewportBounds {
    pub const fn new(west_lng: f64, east_lng: f64) -> Self {
        Self { west_lng, east_lng }
    }

    /// A viewport showing exactly one world copy.
    pub const fn world() -> Self {
        Self::new(-180.0, 180.0)
    }

    /// West edge in normalized Mercator x (one unit per world copy).
    pub fn west_x(&self) -> f64 {
        mercator_x(self.west_lng)
    }

    /// East edge in normalized Mercator x (one unit per world copy).
    pub fn east_x(&self) -> f64 {
        mercator_x(self.east_lng)
    }
}

impl Default for ViewportBounds {
    fn default() -> Self {
        Self::world()
    }
}

/// Longitude in degrees to normalized Web Mercator x, where `[0, 1]` covers
/// the world copy from −180° to 180°.
pub fn mercator_x(lng: f64) -> f64 {
    (180.0 + lng) / 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_names_resolve() {
        assert_eq!(ProjectionMode::from_host_name("mercator"), Ok(ProjectionMode::Flat));
        assert_eq!(ProjectionMode::from_host_name("Globe"), Ok(ProjectionMode::Globe));
        assert_eq!(" flat ".parse::<ProjectionMode>(), Ok(ProjectionMode::Flat));
    }

    #[test]
    fn test_unknown_projection_fails_loudly() {
        let err = ProjectionMode::from_host_name("albers").unwrap_err();
        assert_eq!(
            err,
            GeometryError::UnsupportedProjection {
                name: "albers".to_string()
            }
        );
        assert!(err.to_string().contains("albers"));
    }

    #[test]
    fn test_mercator_x_maps_world_to_unit_interval() {
        assert_eq!(mercator_x(-180.0), 0.0);
        assert_eq!(mercator_x(0.0), 0.5);
        assert_eq!(mercator_x(180.0), 1.0);
        assert_eq!(mercator_x(540.0), 2.0);
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [ProjectionMode::Flat, ProjectionMode::Globe] {
            assert_eq!(mode.to_string().parse::<ProjectionMode>(), Ok(mode));
        }
    }
}
