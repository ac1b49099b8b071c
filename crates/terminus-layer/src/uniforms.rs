//! Per-frame uniform data handed to the shading program.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};
use terminus_shading::{ShadingParameters, premultiply};
use terminus_solar::GeoPoint;

/// How the host supplies its projection.
///
/// Older hosts hand over a single mercator-world matrix; newer ones hand over
/// structured projection data that can also blend between globe and mercator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectionUniforms {
    LegacyMatrix(Mat4),
    Structured {
        main_matrix: Mat4,
        fallback_matrix: Mat4,
        /// Offset (xy) and scale (zw) of the tile in mercator units.
        tile_mercator_coords: Vec4,
        /// Plane `(n, d)`: sphere points with `dot(n, p) + d < 0` are hidden.
        clipping_plane: Vec4,
        /// 0 = globe, 1 = mercator fallback.
        transition: f32,
    },
}

/// Discriminant of [`ProjectionUniforms`], used in shader variant keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectionKind {
    LegacyMatrix,
    Structured,
}

impl ProjectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LegacyMatrix => "legacy-matrix",
            Self::Structured => "structured",
        }
    }
}

impl ProjectionUniforms {
    pub fn kind(&self) -> ProjectionKind {
        match self {
            Self::LegacyMatrix(_) => ProjectionKind::LegacyMatrix,
            Self::Structured { .. } => ProjectionKind::Structured,
        }
    }
}

impl Default for ProjectionUniforms {
    fn default() -> Self {
        Self::LegacyMatrix(Mat4::IDENTITY)
    }
}

/// GPU uniform block for the terminator shader. Layout matches
/// `TerminatorUniform` in `terminator.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct TerminatorUniform {
    pub projection: [[f32; 4]; 4],
    pub fallback_projection: [[f32; 4]; 4],
    pub tile_mercator_coords: [f32; 4],
    pub clipping_plane: [f32; 4],
    /// Premultiplied night color.
    pub night_color: [f32; 4],
    /// Premultiplied daytime color.
    pub daytime_color: [f32; 4],
    /// Subsolar longitude and latitude in degrees.
    pub subsolar: [f32; 2],
    pub opacity: f32,
    pub twilight_steps: i32,
    pub twilight_attenuation: f32,
    pub projection_transition: f32,
    pub _padding: [f32; 2],
}

impl TerminatorUniform {
    pub fn new(
        subsolar: GeoPoint,
        shading: &ShadingParameters,
        projection: &ProjectionUniforms,
    ) -> Self {
        let (main, fallback, tile, clip, transition) = match *projection {
            ProjectionUniforms::LegacyMatrix(matrix) => {
                (matrix, matrix, Vec4::new(0.0, 0.0, 1.0, 1.0), Vec4::ZERO, 0.0)
            }
            ProjectionUniforms::Structured {
                main_matrix,
                fallback_matrix,
                tile_mercator_coords,
                clipping_plane,
                transition,
            } => (
                main_matrix,
                fallback_matrix,
                tile_mercator_coords,
                clipping_plane,
                transition,
            ),
        };

        Self {
            projection: main.to_cols_array_2d(),
            fallback_projection: fallback.to_cols_array_2d(),
            tile_mercator_coords: tile.to_array(),
            clipping_plane: clip.to_array(),
            night_color: premultiply(shading.night_color).to_array(),
            daytime_color: premultiply(shading.daytime_color).to_array(),
            subsolar: [subsolar.longitude as f32, subsolar.latitude as f32],
            opacity: shading.opacity as f32,
            twilight_steps: shading.twilight_steps,
            twilight_attenuation: shading.twilight_attenuation as f32,
            projection_transition: transition,
            _padding: [0.0; 2],
        }
    }
}
