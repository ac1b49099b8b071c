//! Signature-keyed geometry cache.

use std::sync::Arc;

use tracing::debug;

use crate::buffers::MeshBuffers;
use crate::flat::build_flat_quad;
use crate::globe::{DEFAULT_GLOBE_GRANULARITY, build_globe_mesh};
use crate::projection::{ProjectionMode, ViewportBounds};
use crate::signature::GeometrySignature;

/// Build the geometry a signature describes.
pub fn build_geometry(signature: GeometrySignature, globe_granularity: u32) -> MeshBuffers {
    match signature {
        GeometrySignature::Flat { west, east } => build_flat_quad(west as f64, east as f64),
        GeometrySignature::Globe => build_globe_mesh(globe_granularity),
    }
}

/// Signature and buffers are stored together so they can only be replaced
/// as a pair.
#[derive(Clone, Debug)]
struct CachedGeometry {
    signature: GeometrySignature,
    buffers: Arc<MeshBuffers>,
}

/// Holds the most recently built overlay geometry.
#[derive(Debug)]
pub struct GeometryCache {
    globe_granularity: u32,
    entry: Option<CachedGeometry>,
    rebuilds: u64,
}

impl GeometryCache {
    /// An empty cache using [`DEFAULT_GLOBE_GRANULARITY`].
    pub fn new() -> Self {
        Self::with_granularity(DEFAULT_GLOBE_GRANULARITY)
    }

    pub fn with_granularity(globe_granularity: u32) -> Self {
        Self {
            globe_granularity,
            entry: None,
            rebuilds: 0,
        }
    }

    /// Return geometry for `(mode, bounds)`, rebuilding only when the
    /// signature differs from the cached one.
    pub fn build_or_reuse(
        &mut self,
        mode: ProjectionMode,
        bounds: ViewportBounds,
    ) -> Arc<MeshBuffers> {
        let signature = GeometrySignature::compute(mode, bounds);

        if let Some(entry) = &self.entry
            && entry.signature == signature
        {
            return Arc::clone(&entry.buffers);
        }

        let buffers = Arc::new(build_geometry(signature, self.globe_granularity));
        self.rebuilds += 1;
        debug!(
            ?signature,
            vertices = buffers.vertex_count(),
            triangles = buffers.triangle_count(),
            "Rebuilt overlay geometry"
        );

        self.entry = Some(CachedGeometry {
            signature,
            buffers: Arc::clone(&buffers),
        });
        buffers
    }

    /// Signature of the cached geometry, if any.
    pub fn signature(&self) -> Option<GeometrySignature> {
        self.entry.as_ref().map(|e| e.signature)
    }

    /// The cached geometry, if any.
    pub fn buffers(&self) -> Option<Arc<MeshBuffers>> {
        self.entry.as_ref().map(|e| Arc::clone(&e.buffers))
    }

    /// Number of times geometry has been (re)built.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    pub fn globe_granularity(&self) -> u32 {
        self.globe_granularity
    }

    /// Drop the cached geometry.
    pub fn clear(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

impl Default for GeometryCache {
    fn default() -> Self {
        Self::new()
    }
}
