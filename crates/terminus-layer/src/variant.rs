//! Shader program variants, one per projection mode and uniform flavor.

use std::fmt;

use terminus_mesh::ProjectionMode;

use crate::uniforms::ProjectionKind;

/// Shared uniforms and fragment stage.
pub const TERMINATOR_SHADER_COMMON: &str = include_str!("shaders/terminator.wgsl");
/// Vertex stage for flat maps.
pub const TERMINATOR_SHADER_FLAT: &str = include_str!("shaders/flat.wgsl");
/// Vertex stage for the globe.
pub const TERMINATOR_SHADER_GLOBE: &str = include_str!("shaders/globe.wgsl");

/// Selects a compiled shading program. Only compared for equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShaderVariantKey {
    pub mode: ProjectionMode,
    pub projection: ProjectionKind,
}

impl ShaderVariantKey {
    pub const fn new(mode: ProjectionMode, projection: ProjectionKind) -> Self {
        Self { mode, projection }
    }

    /// Stable label such as `"globe/structured"`.
    pub fn as_str(&self) -> &'static str {
        match (self.mode, self.projection) {
            (ProjectionMode::Flat, ProjectionKind::LegacyMatrix) => "mercator/legacy-matrix",
            (ProjectionMode::Flat, ProjectionKind::Structured) => "mercator/structured",
            (ProjectionMode::Globe, ProjectionKind::LegacyMatrix) => "globe/legacy-matrix",
            (ProjectionMode::Globe, ProjectionKind::Structured) => "globe/structured",
        }
    }

    /// Complete WGSL source for this variant.
    pub fn shader_source(&self) -> String {
        let structured = self.projection == ProjectionKind::Structured;
        let vertex_stage = match self.mode {
            ProjectionMode::Flat => TERMINATOR_SHADER_FLAT,
            ProjectionMode::Globe => TERMINATOR_SHADER_GLOBE,
        };
        let header = format!("const STRUCTURED_PROJECTION: bool = {structured};\n");
        format!("{header}\n{TERMINATOR_SHADER_COMMON}\n{vertex_stage}")
    }
}

impl fmt::Display for ShaderVariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
