//! The `terminus` command-line tool.
//!
//! Prints the current subsolar point, writes an equirectangular PNG of the
//! day/night overlay, and optionally drives the layer headlessly.

mod error;
mod headless;
mod image;
mod platform;

use chrono::Utc;
use clap::Parser;
use terminus_config::{CliArgs, Config};
use terminus_layer::LayerOptions;
use terminus_solar::subsolar_point;
use tracing::info;

use crate::error::AppError;
use crate::platform::PlatformDirs;

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("terminus: {e}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let dirs = match &args.config {
        Some(root) => PlatformDirs::resolve_with_root(root),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);
    terminus_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    let moment = config.date().unwrap_or_else(Utc::now);
    let subsolar = subsolar_point(moment);
    println!(
        "Subsolar point at {}: lng {:.4}°, lat {:.4}°",
        moment.to_rfc3339(),
        subsolar.longitude,
        subsolar.latitude
    );

    let render = &config.render;
    image::write_equirect_png(
        &render.output_path,
        render.raster_width,
        render.raster_height,
        subsolar,
        &config.shading_parameters(),
    )?;
    info!(
        path = %render.output_path.display(),
        width = render.raster_width,
        height = render.raster_height,
        "Wrote terminator image"
    );

    if let Some(frames) = args.frames {
        let options = LayerOptions {
            date: config.date(),
            shading: config.shading_parameters(),
            update_interval: config.update_interval(),
            globe_granularity: render.globe_granularity,
        };
        let projection = args.projection.as_deref().unwrap_or("mercator");
        let summary = headless::run_frames(options, projection, frames, moment)?;
        println!(
            "Rendered {} frames ({projection}): {} geometry builds, {} triangles",
            summary.frames, summary.geometry_rebuilds, summary.triangles
        );
        println!(
            "Programs: {} compiled, {} released",
            summary.programs_compiled, summary.programs_released
        );
    }

    Ok(())
}
