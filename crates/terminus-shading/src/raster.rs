//! CPU batch evaluation of the overlay over an equirectangular grid.

use terminus_solar::GeoPoint;

use crate::color::to_straight_rgba8;
use crate::illumination::shade;
use crate::params::ShadingParameters;

/// Shade a `width × height` equirectangular image (longitude × latitude).
///
/// Row 0 is the northernmost row and column 0 starts at −180°. Each pixel is
/// sampled at its center and stored as straight-alpha RGBA, ready for image
/// encoders that do not expect premultiplied data.
pub fn shade_equirect(
    width: u32,
    height: u32,
    subsolar: GeoPoint,
    params: &ShadingParameters,
) -> Vec<[u8; 4]> {
    let mut pixels = Vec::with_capacity(width as usize * height as usize);

    for y in 0..height {
        let latitude = 90.0 - 180.0 * (y as f64 + 0.5) / height as f64;
        for x in 0..width {
            let longitude = 360.0 * (x as f64 + 0.5) / width as f64 - 180.0;
            let color = shade(GeoPoint::new(longitude, latitude), subsolar, params);
            pixels.push(to_straight_rgba8(color));
        }
    }

    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;

    #[test]
    fn test_pixel_count_matches_dimensions() {
        let params = ShadingParameters::default();
        let pixels = shade_equirect(36, 18, GeoPoint::new(0.0, 0.0), &params);
        assert_eq!(pixels.len(), 36 * 18);
        assert!(shade_equirect(0, 4, GeoPoint::new(0.0, 0.0), &params).is_empty());
    }

    #[test]
    fn test_day_side_transparent_night_side_dark() {
        let params = ShadingParameters::default();
        let pixels = shade_equirect(72, 36, GeoPoint::new(0.0, 0.0), &params);
        let row = 18 * 72;

        // Column 36 sits just east of the prime meridian: full daylight.
        assert_eq!(pixels[row + 36], [0, 0, 0, 0]);

        // Column 0 sits near the antimeridian: deep night at half opacity.
        let night = pixels[row];
        assert_eq!(night[0..3], [0, 0, 0]);
        assert!((night[3] as i32 - 128).abs() <= 1, "night alpha {}", night[3]);
    }

    #[test]
    fn test_opaque_day_color_shows_through() {
        let params = ShadingParameters {
            opacity: 1.0,
            daytime_color: Rgba8::new(255, 200, 0, 255),
            ..Default::default()
        };
        let pixels = shade_equirect(8, 4, GeoPoint::new(0.0, 0.0), &params);
        assert_eq!(pixels[8 + 4], [255, 200, 0, 255]);
    }
}
