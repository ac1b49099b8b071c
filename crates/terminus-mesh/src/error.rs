//! Geometry error types.

use thiserror::Error;

/// Errors raised while resolving overlay geometry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// The host reported a projection the overlay has no geometry for.
    #[error("unsupported map projection '{name}' (expected 'mercator' or 'globe')")]
    UnsupportedProjection { name: String },
}
