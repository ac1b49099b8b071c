//! Options the layer is created with.

use std::time::Duration;

use chrono::{DateTime, Utc};
use terminus_mesh::DEFAULT_GLOBE_GRANULARITY;
use terminus_shading::ShadingParameters;

/// Default repaint interval while tracking the wall clock.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_millis(10_000);

/// Layer configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerOptions {
    /// Moment to render; `None` tracks the wall clock.
    pub date: Option<DateTime<Utc>>,
    pub shading: ShadingParameters,
    /// Repaint interval while `date` is `None`.
    pub update_interval: Duration,
    /// Subdivisions of the globe mesh.
    pub globe_granularity: u32,
}

impl Default for LayerOptions {
    fn default() -> Self {
        Self {
            date: None,
            shading: ShadingParameters::default(),
            update_interval: DEFAULT_UPDATE_INTERVAL,
            globe_granularity: DEFAULT_GLOBE_GRANULARITY,
        }
    }
}
