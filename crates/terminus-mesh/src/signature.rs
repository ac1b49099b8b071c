//! Cache keys for overlay geometry.

use crate::projection::{ProjectionMode, ViewportBounds};

/// Identifies one geometry configuration.
///
/// Flat geometry depends on which world copies are visible, so its signature
/// is the integer span `[floor(west_x), ceil(east_x)]` in normalized Mercator
/// units. Globe geometry does not depend on the viewport at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometrySignature {
    Flat { west: i64, east: i64 },
    Globe,
}

impl GeometrySignature {
    pub fn compute(mode: ProjectionMode, bounds: ViewportBounds) -> Self {
        match mode {
            ProjectionMode::Flat => Self::Flat {
                west: bounds.west_x().floor() as i64,
                east: bounds.east_x().ceil() as i64,
            },
            ProjectionMode::Globe => Self::Globe,
        }
    }

    pub fn mode(&self) -> ProjectionMode {
        match self {
            Self::Flat { .. } => ProjectionMode::Flat,
            Self::Globe => ProjectionMode::Globe,
        }
    }
}
