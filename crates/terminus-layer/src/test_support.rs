//! In-memory host and backend used by the unit tests.

use terminus_mesh::ViewportBounds;

use crate::backend::{DrawCall, RenderBackend};
use crate::host::MapHost;
use crate::uniforms::ProjectionUniforms;
use crate::variant::ShaderVariantKey;

pub struct FakeHost {
    pub projection: String,
    pub bounds: ViewportBounds,
    pub uniforms: ProjectionUniforms,
    pub repaints: usize,
}

impl FakeHost {
    pub fn flat(bounds: ViewportBounds) -> Self {
        Self {
            projection: "mercator".to_string(),
            bounds,
            uniforms: ProjectionUniforms::default(),
            repaints: 0,
        }
    }
}

impl MapHost for FakeHost {
    fn projection_name(&self) -> &str {
        &self.projection
    }

    fn viewport_bounds(&self) -> ViewportBounds {
        self.bounds
    }

    fn projection_uniforms(&self) -> ProjectionUniforms {
        self.uniforms
    }

    fn request_repaint(&mut self) {
        self.repaints += 1;
    }
}

#[derive(Debug, thiserror::Error)]
#[error("recording backend refused to compile")]
pub struct RecordingError;

#[derive(Default)]
pub struct RecordingBackend {
    pub compiled: Vec<String>,
    pub released: Vec<String>,
    pub draws: Vec<DrawCall>,
    pub fail_compile: bool,
}

impl RenderBackend for RecordingBackend {
    type Program = ShaderVariantKey;
    type Error = RecordingError;

    fn compile(
        &mut self,
        variant: ShaderVariantKey,
        source: &str,
    ) -> Result<Self::Program, Self::Error> {
        if self.fail_compile {
            return Err(RecordingError);
        }
        assert!(source.contains("fn fs_main"));
        self.compiled.push(variant.to_string());
        Ok(variant)
    }

    fn release(&mut self, program: Self::Program) {
        self.released.push(program.to_string());
    }

    fn draw(&mut self, program: &Self::Program, call: &DrawCall) -> Result<(), Self::Error> {
        assert_eq!(*program, call.variant);
        self.draws.push(call.clone());
        Ok(())
    }
}
