//! Layer error types.

use terminus_mesh::GeometryError;
use thiserror::Error;

/// Errors surfaced by the per-frame render call.
#[derive(Debug, Error)]
pub enum LayerError {
    /// The host is in a projection the overlay cannot draw.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The rendering backend failed to compile a shader variant.
    #[error("failed to compile shader variant '{variant}': {source}")]
    Compile {
        variant: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The rendering backend failed to submit a draw.
    #[error("failed to draw overlay: {0}")]
    Draw(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// `render` was called before the layer was added to a map.
    #[error("layer '{id}' is not attached to a map")]
    NotAttached { id: String },
}
