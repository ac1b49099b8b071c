//! The rendering backend that compiles programs and records draws.

use std::sync::Arc;

use terminus_mesh::MeshBuffers;
use terminus_solar::GeoPoint;

use crate::uniforms::TerminatorUniform;
use crate::variant::ShaderVariantKey;

/// Everything needed to draw the overlay once.
#[derive(Clone, Debug)]
pub struct DrawCall {
    pub variant: ShaderVariantKey,
    pub subsolar: GeoPoint,
    pub uniform: TerminatorUniform,
    pub mesh: Arc<MeshBuffers>,
}

/// Compiles shading programs and submits draws on behalf of the layer.
pub trait RenderBackend {
    /// Opaque handle to a compiled program.
    type Program;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Compile the program for `variant` from WGSL `source`.
    fn compile(
        &mut self,
        variant: ShaderVariantKey,
        source: &str,
    ) -> Result<Self::Program, Self::Error>;

    /// Release a program previously returned by [`compile`](Self::compile).
    fn release(&mut self, program: Self::Program);

    /// Submit one draw of the overlay.
    fn draw(&mut self, program: &Self::Program, call: &DrawCall) -> Result<(), Self::Error>;
}
