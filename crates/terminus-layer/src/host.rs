//! The map host the overlay is attached to.

use terminus_mesh::ViewportBounds;

use crate::uniforms::ProjectionUniforms;

/// What the overlay needs from the host map each frame.
///
/// The host owns the render loop, viewport and coordinate transforms; the
/// overlay only reads them.
pub trait MapHost {
    /// Name of the current projection, e.g. `"mercator"` or `"globe"`.
    fn projection_name(&self) -> &str;

    /// Visible longitudinal span (only meaningful for flat projections).
    fn viewport_bounds(&self) -> ViewportBounds;

    /// Projection data for this frame, in whichever form the host supports.
    fn projection_uniforms(&self) -> ProjectionUniforms;

    /// Ask the host to schedule another frame.
    fn request_repaint(&mut self);
}
