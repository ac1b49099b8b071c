//! Engine state and the per-frame render step.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use terminus_mesh::{GeometryCache, GeometrySignature, ProjectionMode};
use terminus_shading::ShadingParameters;
use terminus_solar::{GeoPoint, subsolar_point};
use tracing::{debug, error, trace};

use crate::backend::{DrawCall, RenderBackend};
use crate::error::LayerError;
use crate::host::MapHost;
use crate::options::LayerOptions;
use crate::timer::RepaintTimer;
use crate::uniforms::TerminatorUniform;
use crate::variant::ShaderVariantKey;

/// Mutable state owned by one attached overlay.
///
/// `P` is the backend's compiled program handle.
#[derive(Debug)]
pub struct EngineState<P> {
    /// Moment to render; `None` tracks the wall clock.
    pub current_time: Option<DateTime<Utc>>,
    pub shading: ShadingParameters,
    pub geometry: GeometryCache,
    pub compiled_variants: HashMap<ShaderVariantKey, P>,
    pub repaint: RepaintTimer,
}

/// What happened during one [`render_frame`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub subsolar: GeoPoint,
    pub variant: ShaderVariantKey,
    pub signature: GeometrySignature,
    pub geometry_rebuilt: bool,
    pub program_compiled: bool,
}

impl<P> EngineState<P> {
    /// Fresh state for a layer being attached at `now`.
    pub fn new(options: &LayerOptions, now: Instant) -> Self {
        let mut repaint = RepaintTimer::new(options.update_interval);
        if options.date.is_none() {
            repaint.arm(now);
        }
        Self {
            current_time: options.date,
            shading: options.shading,
            geometry: GeometryCache::with_granularity(options.globe_granularity),
            compiled_variants: HashMap::new(),
            repaint,
        }
    }

    /// Fix the rendered moment, or return to the wall clock with `None`.
    ///
    /// The repaint timer only runs while tracking the wall clock.
    pub fn set_date(&mut self, date: Option<DateTime<Utc>>, now: Instant) {
        self.current_time = date;
        match date {
            Some(_) => self.repaint.disarm(),
            None if !self.repaint.is_armed() => self.repaint.arm(now),
            None => {}
        }
    }

    /// Release compiled programs and cached geometry, and stop the timer.
    pub fn release<B>(&mut self, backend: &mut B)
    where
        B: RenderBackend<Program = P>,
    {
        for (variant, program) in self.compiled_variants.drain() {
            debug!(%variant, "Releasing terminator program");
            backend.release(program);
        }
        self.geometry.clear();
        self.repaint.disarm();
    }
}

/// Render one frame of the overlay.
///
/// `now` is used only when no fixed date is set.
pub fn render_frame<H, B>(
    state: &mut EngineState<B::Program>,
    host: &H,
    backend: &mut B,
    now: DateTime<Utc>,
) -> Result<FrameReport, LayerError>
where
    H: MapHost + ?Sized,
    B: RenderBackend,
{
    let subsolar = subsolar_point(state.current_time.unwrap_or(now));

    let mode = ProjectionMode::from_host_name(host.projection_name()).inspect_err(|e| {
        error!("Cannot draw terminator overlay: {e}");
    })?;

    let bounds = host.viewport_bounds();
    let rebuilds_before = state.geometry.rebuild_count();
    let mesh = state.geometry.build_or_reuse(mode, bounds);
    let geometry_rebuilt = state.geometry.rebuild_count() != rebuilds_before;
    let signature = state
        .geometry
        .signature()
        .unwrap_or_else(|| GeometrySignature::compute(mode, bounds));

    let projection = host.projection_uniforms();
    let variant = ShaderVariantKey::new(mode, projection.kind());

    let mut program_compiled = false;
    let program = match state.compiled_variants.entry(variant) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => {
            let program = backend
                .compile(variant, &variant.shader_source())
                .map_err(|source| LayerError::Compile {
                    variant: variant.to_string(),
                    source: Box::new(source),
                })?;
            debug!(%variant, "Compiled terminator program");
            program_compiled = true;
            entry.insert(program)
        }
    };

    let call = DrawCall {
        variant,
        subsolar,
        uniform: TerminatorUniform::new(subsolar, &state.shading, &projection),
        mesh: Arc::clone(&mesh),
    };
    backend
        .draw(program, &call)
        .map_err(|e| LayerError::Draw(Box::new(e)))?;

    trace!(
        lng = subsolar.longitude,
        lat = subsolar.latitude,
        %variant,
        geometry_rebuilt,
        "Rendered terminator overlay"
    );

    Ok(FrameReport {
        subsolar,
        variant,
        signature,
        geometry_rebuilt,
        program_compiled,
    })
}
