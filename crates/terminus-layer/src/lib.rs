//! Day/night terminator overlay for a host map.
//!
//! [`TerminatorLayer`] owns the option surface and lifecycle. Each frame it
//! resolves the subsolar point, fetches cached geometry, selects a compiled
//! shader variant, and hands a [`DrawCall`] to a [`RenderBackend`].
//! [`WgpuBackend`] is the GPU implementation.

mod backend;
mod error;
mod gpu;
mod host;
mod layer;
mod options;
mod state;
mod timer;
mod uniforms;
mod variant;

#[cfg(test)]
mod test_support;

pub use backend::{DrawCall, RenderBackend};
pub use error::LayerError;
pub use gpu::{WgpuBackend, WgpuProgram};
pub use host::MapHost;
pub use layer::TerminatorLayer;
pub use options::{DEFAULT_UPDATE_INTERVAL, LayerOptions};
pub use state::{EngineState, FrameReport, render_frame};
pub use timer::RepaintTimer;
pub use uniforms::{ProjectionKind, ProjectionUniforms, TerminatorUniform};
pub use variant::{
    ShaderVariantKey, TERMINATOR_SHADER_COMMON, TERMINATOR_SHADER_FLAT, TERMINATOR_SHADER_GLOBE,
};
