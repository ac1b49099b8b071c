//! The overlay layer: lifecycle, option setters, and per-frame entry point.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use terminus_shading::{Rgba8, ShadingParameters};
use tracing::{info, warn};

use crate::backend::RenderBackend;
use crate::error::LayerError;
use crate::host::MapHost;
use crate::options::LayerOptions;
use crate::state::{EngineState, FrameReport, render_frame};

/// A day/night terminator overlay.
///
/// Engine state exists only between [`on_add`](Self::on_add) and
/// [`on_remove`](Self::on_remove). Setters work in either phase; while
/// attached they also mark the layer for repaint.
pub struct TerminatorLayer<B: RenderBackend> {
    id: String,
    options: LayerOptions,
    state: Option<EngineState<B::Program>>,
    needs_repaint: bool,
}

impl<B: RenderBackend> TerminatorLayer<B> {
    pub fn new(id: impl Into<String>, options: LayerOptions) -> Self {
        Self {
            id: id.into(),
            options,
            state: None,
            needs_repaint: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn options(&self) -> &LayerOptions {
        &self.options
    }

    pub fn is_attached(&self) -> bool {
        self.state.is_some()
    }

    /// Engine state, if attached.
    pub fn state(&self) -> Option<&EngineState<B::Program>> {
        self.state.as_ref()
    }

    /// Attach to a map at `now`. Ignored if the layer is already attached.
    pub fn on_add(&mut self, now: Instant) {
        if self.state.is_some() {
            warn!(id = %self.id, "Terminator layer is already attached");
            return;
        }
        info!(id = %self.id, live = self.options.date.is_none(), "Terminator layer added");
        self.state = Some(EngineState::new(&self.options, now));
        self.needs_repaint = true;
    }

    /// Detach from the map, releasing every backend resource and stopping
    /// the repaint timer.
    pub fn on_remove(&mut self, backend: &mut B) {
        if let Some(mut state) = self.state.take() {
            state.release(backend);
            info!(id = %self.id, "Terminator layer removed");
        }
        self.needs_repaint = false;
    }

    /// Render one frame, using the wall clock if no date is set.
    pub fn render<H: MapHost + ?Sized>(
        &mut self,
        host: &H,
        backend: &mut B,
    ) -> Result<FrameReport, LayerError> {
        self.render_at(host, backend, Utc::now())
    }

    /// Render one frame as if the wall clock read `now`.
    pub fn render_at<H: MapHost + ?Sized>(
        &mut self,
        host: &H,
        backend: &mut B,
        now: DateTime<Utc>,
    ) -> Result<FrameReport, LayerError> {
        let state = self.state.as_mut().ok_or_else(|| LayerError::NotAttached {
            id: self.id.clone(),
        })?;
        let report = render_frame(state, host, backend, now)?;
        self.needs_repaint = false;
        Ok(report)
    }

    /// Request a repaint from `host` if an option changed or the repaint
    /// timer fired. Returns whether a repaint was requested.
    pub fn poll_repaint<H: MapHost + ?Sized>(&mut self, host: &mut H, now: Instant) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        let timer_fired = state.repaint.poll(now);
        if timer_fired || self.needs_repaint {
            self.needs_repaint = false;
            host.request_repaint();
            return true;
        }
        false
    }

    fn update_shading(&mut self, apply: impl Fn(&mut ShadingParameters)) {
        apply(&mut self.options.shading);
        if let Some(state) = self.state.as_mut() {
            apply(&mut state.shading);
            self.needs_repaint = true;
        }
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.options.date
    }

    /// Fix the rendered moment, or track the wall clock again with `None`.
    pub fn set_date(&mut self, date: Option<DateTime<Utc>>) {
        self.options.date = date;
        if let Some(state) = self.state.as_mut() {
            state.set_date(date, Instant::now());
            self.needs_repaint = true;
        }
    }

    pub fn opacity(&self) -> f64 {
        self.options.shading.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.update_shading(|s| s.opacity = opacity);
    }

    /// Alias of [`night_color`](Self::night_color).
    pub fn color(&self) -> Rgba8 {
        self.night_color()
    }

    /// Alias of [`set_night_color`](Self::set_night_color).
    pub fn set_color(&mut self, color: Rgba8) {
        self.set_night_color(color);
    }

    pub fn night_color(&self) -> Rgba8 {
        self.options.shading.night_color
    }

    pub fn set_night_color(&mut self, color: Rgba8) {
        self.update_shading(|s| s.night_color = color);
    }

    pub fn daytime_color(&self) -> Rgba8 {
        self.options.shading.daytime_color
    }

    pub fn set_daytime_color(&mut self, color: Rgba8) {
        self.update_shading(|s| s.daytime_color = color);
    }

    pub fn twilight_steps(&self) -> i32 {
        self.options.shading.twilight_steps
    }

    pub fn set_twilight_steps(&mut self, steps: i32) {
        self.update_shading(|s| s.twilight_steps = steps);
    }

    pub fn twilight_attenuation(&self) -> f64 {
        self.options.shading.twilight_attenuation
    }

    pub fn set_twilight_attenuation(&mut self, attenuation: f64) {
        self.update_shading(|s| s.twilight_attenuation = attenuation);
    }

    pub fn update_interval(&self) -> Duration {
        self.options.update_interval
    }

    pub fn set_update_interval(&mut self, interval: Duration) {
        self.options.update_interval = interval;
        if let Some(state) = self.state.as_mut() {
            state.repaint.set_interval(interval, Instant::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeHost, RecordingBackend};
    use chrono::TimeZone;
    use terminus_mesh::ViewportBounds;

    type Layer = TerminatorLayer<RecordingBackend>;

    fn solstice() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_defaults_match_public_option_surface() {
        let layer = Layer::new("daynight", LayerOptions::default());
        assert_eq!(layer.date(), None);
        assert_eq!(layer.opacity(), 0.5);
        assert_eq!(layer.color(), Rgba8::BLACK);
        assert_eq!(layer.daytime_color(), Rgba8::TRANSPARENT);
        assert_eq!(layer.twilight_steps(), 0);
        assert_eq!(layer.twilight_attenuation(), 0.5);
        assert_eq!(layer.update_interval(), Duration::from_millis(10_000));
        assert!(!layer.is_attached());
    }

    #[test]
    fn test_render_before_add_fails() {
        let mut layer = Layer::new("daynight", LayerOptions::default());
        let host = FakeHost::flat(ViewportBounds::world());
        let mut backend = RecordingBackend::default();
        let err = layer.render(&host, &mut backend).unwrap_err();
        assert!(matches!(err, LayerError::NotAttached { .. }));
    }

    #[test]
    fn test_setters_before_add_apply_on_attach() {
        let mut layer = Layer::new("daynight", LayerOptions::default());
        layer.set_opacity(0.8);
        layer.set_color(Rgba8::new(10, 20, 30, 255));
        layer.set_date(Some(solstice()));
        layer.on_add(Instant::now());

        let state = layer.state().unwrap();
        assert_eq!(state.shading.opacity, 0.8);
        assert_eq!(state.shading.night_color, Rgba8::new(10, 20, 30, 255));
        assert_eq!(state.current_time, Some(solstice()));
        assert!(!state.repaint.is_armed());
    }

    #[test]
    fn test_setters_while_attached_update_state_and_request_repaint() {
        let mut layer = Layer::new("daynight", LayerOptions::default());
        let mut host = FakeHost::flat(ViewportBounds::world());
        let mut backend = RecordingBackend::default();
        let t0 = Instant::now();
        layer.on_add(t0);
        layer.render(&host, &mut backend).unwrap();
        assert!(!layer.poll_repaint(&mut host, t0));

        layer.set_twilight_steps(3);
        layer.set_twilight_attenuation(0.25);
        layer.set_daytime_color(Rgba8::new(255, 255, 255, 40));
        assert!(layer.poll_repaint(&mut host, t0));
        assert_eq!(host.repaints, 1);

        let state = layer.state().unwrap();
        assert_eq!(state.shading.twilight_steps, 3);
        assert_eq!(state.shading.twilight_attenuation, 0.25);
        assert_eq!(state.shading.daytime_color, Rgba8::new(255, 255, 255, 40));
    }

    #[test]
    fn test_live_clock_repaints_on_interval() {
        let mut layer = Layer::new("daynight", LayerOptions::default());
        let mut host = FakeHost::flat(ViewportBounds::world());
        let mut backend = RecordingBackend::default();
        let t0 = Instant::now();
        layer.on_add(t0);
        layer.render(&host, &mut backend).unwrap();

        assert!(!layer.poll_repaint(&mut host, t0 + Duration::from_secs(5)));
        assert!(layer.poll_repaint(&mut host, t0 + Duration::from_secs(10)));
        assert_eq!(host.repaints, 1);
    }

    #[test]
    fn test_fixed_date_disables_timer_and_clearing_reenables() {
        let mut layer = Layer::new("daynight", LayerOptions::default());
        layer.on_add(Instant::now());

        layer.set_date(Some(solstice()));
        assert!(!layer.state().unwrap().repaint.is_armed());

        layer.set_date(None);
        assert!(layer.state().unwrap().repaint.is_armed());
    }

    #[test]
    fn test_fixed_date_never_repaints_on_timer() {
        let options = LayerOptions {
            date: Some(solstice()),
            ..Default::default()
        };
        let mut layer = Layer::new("daynight", options);
        let mut host = FakeHost::flat(ViewportBounds::world());
        let mut backend = RecordingBackend::default();
        let t0 = Instant::now();
        layer.on_add(t0);
        layer.render(&host, &mut backend).unwrap();

        assert!(!layer.poll_repaint(&mut host, t0 + Duration::from_secs(3600)));
        assert_eq!(host.repaints, 0);
    }

    #[test]
    fn test_remove_releases_and_silences_timer() {
        let mut layer = Layer::new("daynight", LayerOptions::default());
        let mut host = FakeHost::flat(ViewportBounds::world());
        let mut backend = RecordingBackend::default();
        let t0 = Instant::now();
        layer.on_add(t0);
        layer.render(&host, &mut backend).unwrap();

        layer.on_remove(&mut backend);
        assert!(!layer.is_attached());
        assert_eq!(backend.released, backend.compiled);
        assert!(!layer.poll_repaint(&mut host, t0 + Duration::from_secs(60)));
        assert_eq!(host.repaints, 0);
    }

    #[test]
    fn test_second_add_keeps_compiled_programs() {
        let mut layer = Layer::new("daynight", LayerOptions::default());
        let host = FakeHost::flat(ViewportBounds::world());
        let mut backend = RecordingBackend::default();

        layer.on_add(Instant::now());
        layer.render(&host, &mut backend).unwrap();
        layer.on_add(Instant::now());
        layer.render(&host, &mut backend).unwrap();
        layer.on_remove(&mut backend);

        assert_eq!(backend.compiled.len(), 1);
        assert_eq!(backend.released, backend.compiled);
    }

    #[test]
    fn test_update_interval_setter_reschedules() {
        let mut layer = Layer::new("daynight", LayerOptions::default());
        let mut host = FakeHost::flat(ViewportBounds::world());
        let mut backend = RecordingBackend::default();
        layer.on_add(Instant::now());
        layer.render(&host, &mut backend).unwrap();

        layer.set_update_interval(Duration::from_millis(500));
        assert_eq!(layer.update_interval(), Duration::from_millis(500));
        assert_eq!(
            layer.state().unwrap().repaint.interval(),
            Duration::from_millis(500)
        );
        assert!(layer.poll_repaint(&mut host, Instant::now() + Duration::from_secs(1)));
    }

    #[test]
    fn test_render_reports_fixed_date() {
        let options = LayerOptions {
            date: Some(solstice()),
            globe_granularity: 6,
            ..Default::default()
        };
        let mut layer = Layer::new("daynight", options);
        let host = FakeHost::flat(ViewportBounds::world());
        let mut backend = RecordingBackend::default();
        layer.on_add(Instant::now());
        let report = layer.render(&host, &mut backend).unwrap();
        assert!((report.subsolar.latitude - 23.4).abs() < 1.0);
    }
}
