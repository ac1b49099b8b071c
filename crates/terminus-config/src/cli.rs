//! Command-line argument parsing for the `terminus` tool.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;
use terminus_mesh::MAX_GLOBE_GRANULARITY;
use terminus_shading::Rgba8;

use crate::Config;

/// Terminator overlay command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "terminus", about = "Day/night terminator overlay")]
pub struct CliArgs {
    /// Fixed moment to render, RFC 3339 (e.g. 2024-06-20T12:00:00Z).
    #[arg(long)]
    pub date: Option<DateTime<Utc>>,

    /// Overlay opacity.
    #[arg(long)]
    pub opacity: Option<f64>,

    /// Night color as #rrggbb or #rrggbbaa.
    #[arg(long, alias = "color", value_parser = parse_hex_color)]
    pub night_color: Option<Rgba8>,

    /// Day color as #rrggbb or #rrggbbaa.
    #[arg(long, value_parser = parse_hex_color)]
    pub daytime_color: Option<Rgba8>,

    /// Number of twilight bands (0 = continuous).
    #[arg(long, allow_negative_numbers = true)]
    pub twilight_steps: Option<i32>,

    /// Brightness lost per twilight band.
    #[arg(long)]
    pub twilight_attenuation: Option<f64>,

    /// Globe mesh subdivisions.
    #[arg(long, value_parser = clap::value_parser!(u32).range(..=MAX_GLOBE_GRANULARITY as i64))]
    pub granularity: Option<u32>,

    /// Output image width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Output image height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Output image path.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Drive the layer headlessly for this many frames.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Projection for headless frames ("mercator" or "globe").
    #[arg(long)]
    pub projection: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Result<Rgba8, String> {
    let hex = s.trim().trim_start_matches('#');
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        return Err(format!("expected #rrggbb or #rrggbbaa, got '{s}'"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|e| format!("invalid color '{s}': {e}"))
    };
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Rgba8::new(channel(0)?, channel(2)?, channel(4)?, alpha))
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(date) = args.date {
            self.layer.date = Some(date);
        }
        if let Some(opacity) = args.opacity {
            self.layer.opacity = opacity;
        }
        if let Some(color) = args.night_color {
            self.layer.night_color = color;
        }
        if let Some(color) = args.daytime_color {
            self.layer.daytime_color = color;
        }
        if let Some(steps) = args.twilight_steps {
            self.layer.twilight_steps = steps;
        }
        if let Some(attenuation) = args.twilight_attenuation {
            self.layer.twilight_attenuation = attenuation;
        }
        if let Some(granularity) = args.granularity {
            self.render.globe_granularity = granularity;
        }
        if let Some(w) = args.width {
            self.render.raster_width = w;
        }
        if let Some(h) = args.height {
            self.render.raster_height = h;
        }
        if let Some(ref output) = args.output {
            self.render.output_path = output.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
