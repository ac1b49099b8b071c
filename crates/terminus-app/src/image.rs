//! PNG output of the shaded overlay.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use terminus_shading::{ShadingParameters, shade_equirect};
use terminus_solar::GeoPoint;

use crate::error::AppError;

/// Encode straight-alpha RGBA pixels as an 8-bit PNG.
pub fn encode_png<W: Write>(
    out: W,
    width: u32,
    height: u32,
    pixels: &[[u8; 4]],
) -> Result<(), AppError> {
    let mut encoder = png::Encoder::new(out, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(pixels.as_flattened())?;
    writer.finish()?;
    Ok(())
}

/// Shade a `width × height` equirectangular map and write it to `path`.
pub fn write_equirect_png(
    path: &Path,
    width: u32,
    height: u32,
    subsolar: GeoPoint,
    params: &ShadingParameters,
) -> Result<(), AppError> {
    if width == 0 || height == 0 {
        return Err(AppError::EmptyImage { width, height });
    }
    let pixels = shade_equirect(width, height, subsolar, params);
    let file = File::create(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    encode_png(BufWriter::new(file), width, height, &pixels)
}
