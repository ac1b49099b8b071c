//! Drive the overlay without a window to exercise its frame loop.
//!
//! The in-process host pans the viewport a few degrees each frame and the
//! backend only records what it was asked to do, so runs report how often
//! geometry and shader programs were actually rebuilt.

use std::convert::Infallible;
use std::time::Instant;

use chrono::{DateTime, TimeDelta, Utc};
use terminus_layer::{
    DrawCall, LayerOptions, MapHost, ProjectionUniforms, RenderBackend, ShaderVariantKey,
    TerminatorLayer,
};
use terminus_mesh::ViewportBounds;
use tracing::{debug, info};

use crate::error::AppError;

/// Degrees the headless viewport pans per frame.
const PAN_PER_FRAME_DEG: f64 = 7.0;

/// Starting viewport: a 120° regional view inside the first world copy.
const INITIAL_VIEWPORT: ViewportBounds = ViewportBounds::new(-150.0, -30.0);

/// A map that pans east by a fixed step every frame.
pub struct PanningHost {
    projection: String,
    bounds: ViewportBounds,
}

impl PanningHost {
    pub fn new(projection: impl Into<String>) -> Self {
        Self {
            projection: projection.into(),
            bounds: INITIAL_VIEWPORT,
        }
    }

    pub fn pan(&mut self, degrees: f64) {
        let ViewportBounds { west_lng, east_lng } = self.bounds;
        self.bounds = ViewportBounds::new(west_lng + degrees, east_lng + degrees);
    }
}

impl MapHost for PanningHost {
    fn projection_name(&self) -> &str {
        &self.projection
    }

    fn viewport_bounds(&self) -> ViewportBounds {
        self.bounds
    }

    fn projection_uniforms(&self) -> ProjectionUniforms {
        ProjectionUniforms::default()
    }

    // Frames are driven unconditionally.
    fn request_repaint(&mut self) {}
}

/// Backend that accepts every program and draw without touching a GPU.
#[derive(Default)]
pub struct StatsBackend {
    pub programs_compiled: u32,
    pub programs_released: u32,
    pub triangles: usize,
}

impl RenderBackend for StatsBackend {
    type Program = ShaderVariantKey;
    type Error = Infallible;

    fn compile(
        &mut self,
        variant: ShaderVariantKey,
        _source: &str,
    ) -> Result<ShaderVariantKey, Infallible> {
        self.programs_compiled += 1;
        Ok(variant)
    }

    fn release(&mut self, _program: ShaderVariantKey) {
        self.programs_released += 1;
    }

    fn draw(&mut self, _program: &ShaderVariantKey, call: &DrawCall) -> Result<(), Infallible> {
        self.triangles += call.mesh.triangle_count();
        Ok(())
    }
}

/// Totals from one headless run.
#[derive(Debug, Default, PartialEq)]
pub struct HeadlessSummary {
    pub frames: u32,
    pub geometry_rebuilds: u32,
    pub programs_compiled: u32,
    pub programs_released: u32,
    pub triangles: usize,
}

/// Render `frames` frames, advancing simulated time by the update interval
/// per frame when no fixed date is set.
pub fn run_frames(
    options: LayerOptions,
    projection: &str,
    frames: u32,
    start: DateTime<Utc>,
) -> Result<HeadlessSummary, AppError> {
    let mut backend = StatsBackend::default();
    let mut summary = drive_layer(options, projection, frames, start, &mut backend)?;

    summary.programs_compiled = backend.programs_compiled;
    summary.programs_released = backend.programs_released;
    summary.triangles = backend.triangles;
    info!(
        frames = summary.frames,
        rebuilds = summary.geometry_rebuilds,
        programs = summary.programs_compiled,
        "Headless run finished"
    );
    Ok(summary)
}

/// Attach a layer, render against a [`PanningHost`], and detach again.
///
/// The layer is detached even when a frame fails, so `backend` gets back
/// every program it compiled.
fn drive_layer<B: RenderBackend>(
    options: LayerOptions,
    projection: &str,
    frames: u32,
    start: DateTime<Utc>,
    backend: &mut B,
) -> Result<HeadlessSummary, AppError> {
    let step = TimeDelta::from_std(options.update_interval).unwrap_or(TimeDelta::zero());
    let mut layer: TerminatorLayer<B> = TerminatorLayer::new("terminus-headless", options);
    let mut host = PanningHost::new(projection);
    let mut summary = HeadlessSummary::default();

    layer.on_add(Instant::now());
    let mut now = start;
    let mut result = Ok(());
    for frame in 0..frames {
        let report = match layer.render_at(&host, backend, now) {
            Ok(report) => report,
            Err(e) => {
                result = Err(e);
                break;
            }
        };
        if report.geometry_rebuilt {
            summary.geometry_rebuilds += 1;
            debug!(frame, signature = ?report.signature, "Geometry rebuilt");
        }
        summary.frames += 1;
        host.pan(PAN_PER_FRAME_DEG);
        now += step;
    }
    layer.on_remove(backend);

    result?;
    Ok(summary)
}
