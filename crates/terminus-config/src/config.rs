//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use terminus_mesh::DEFAULT_GLOBE_GRANULARITY;
use terminus_shading::{Rgba8, ShadingParameters};

use crate::error::ConfigError;

/// File name used inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Overlay options.
    pub layer: LayerConfig,
    /// Output and mesh settings.
    pub render: RenderConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Overlay options, as exposed by the layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayerConfig {
    /// Fixed moment to render (RFC 3339). `None` follows the wall clock.
    pub date: Option<DateTime<Utc>>,
    /// Overlay opacity, nominally 0.0 - 1.0.
    pub opacity: f64,
    /// Color of full night. `color` is accepted as an alias.
    #[serde(alias = "color")]
    pub night_color: Rgba8,
    /// Color of full day.
    pub daytime_color: Rgba8,
    /// Discrete twilight bands; 0 for a continuous gradient.
    pub twilight_steps: i32,
    /// Brightness lost per twilight band.
    pub twilight_attenuation: f64,
    /// Repaint interval in milliseconds while following the wall clock.
    pub update_interval_ms: u64,
}

/// Output and mesh configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Subdivisions of the globe mesh.
    pub globe_granularity: u32,
    /// Width of the equirectangular image in pixels.
    pub raster_width: u32,
    /// Height of the equirectangular image in pixels.
    pub raster_height: u32,
    /// Where the image is written.
    pub output_path: PathBuf,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for LayerConfig {
    fn default() -> Self {
        let shading = ShadingParameters::default();
        Self {
            date: None,
            opacity: shading.opacity,
            night_color: shading.night_color,
            daytime_color: shading.daytime_color,
            twilight_steps: shading.twilight_steps,
            twilight_attenuation: shading.twilight_attenuation,
            update_interval_ms: 10_000,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            globe_granularity: DEFAULT_GLOBE_GRANULARITY,
            raster_width: 720,
            raster_height: 360,
            output_path: PathBuf::from("terminator.png"),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Bridges to engine types ---

impl Config {
    /// Shading parameters for the illumination model.
    pub fn shading_parameters(&self) -> ShadingParameters {
        ShadingParameters {
            opacity: self.layer.opacity,
            night_color: self.layer.night_color,
            daytime_color: self.layer.daytime_color,
            twilight_steps: self.layer.twilight_steps,
            twilight_attenuation: self.layer.twilight_attenuation,
        }
    }

    /// The fixed moment to render, if any.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.layer.date
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.layer.update_interval_ms)
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read_from(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let write_error = |source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_error)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(write_error)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read_from(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read_from(config_path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::ReadError {
                path: config_path.to_path_buf(),
                source,
            })?;
        ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: config_path.to_path_buf(),
            source,
        })
    }
}
