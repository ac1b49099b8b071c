//! 8-bit RGBA colors and alpha premultiplication.

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// An sRGB color with 8-bit channels and straight (non-premultiplied) alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        c.to_array()
    }
}

/// Convert to normalized premultiplied alpha: `(r·a/255², g·a/255², b·a/255², a/255)`.
pub fn premultiply(color: Rgba8) -> Vec4 {
    let a = color.a as f32;
    let scale = a / (255.0 * 255.0);
    Vec4::new(
        color.r as f32 * scale,
        color.g as f32 * scale,
        color.b as f32 * scale,
        a / 255.0,
    )
}

/// Convert a normalized premultiplied color back to straight 8-bit RGBA.
///
/// Fully transparent input maps to `[0, 0, 0, 0]`.
pub fn to_straight_rgba8(color: Vec4) -> [u8; 4] {
    let alpha = color.w.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return [0, 0, 0, 0];
    }
    let channel = |v: f32| ((v / alpha).clamp(0.0, 1.0) * 255.0).round() as u8;
    [
        channel(color.x),
        channel(color.y),
        channel(color.z),
        (alpha * 255.0).round() as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premultiply_opaque_white_is_unit() {
        let c = premultiply(Rgba8::new(255, 255, 255, 255));
        assert!((c - Vec4::ONE).abs().max_element() < 1e-6);
    }

    #[test]
    fn test_premultiply_scales_by_alpha() {
        let c = premultiply(Rgba8::new(255, 0, 102, 51));
        assert!((c.x - 0.2).abs() < 1e-6, "r = {}", c.x);
        assert_eq!(c.y, 0.0);
        assert!((c.z - 0.08).abs() < 1e-6, "b = {}", c.z);
        assert!((c.w - 0.2).abs() < 1e-6, "a = {}", c.w);
    }

    #[test]
    fn test_premultiply_transparent_is_zero() {
        assert_eq!(premultiply(Rgba8::TRANSPARENT), Vec4::ZERO);
        assert_eq!(premultiply(Rgba8::new(200, 10, 30, 0)), Vec4::ZERO);
    }

    #[test]
    fn test_straight_conversion_undoes_premultiply() {
        let original = Rgba8::new(40, 80, 200, 128);
        let back = to_straight_rgba8(premultiply(original));
        for (a, b) in original.to_array().iter().zip(back.iter()) {
            assert!((*a as i32 - *b as i32).abs() <= 1, "{original:?} -> {back:?}");
        }
    }

    #[test]
    fn test_straight_conversion_of_transparent() {
        assert_eq!(to_straight_rgba8(Vec4::ZERO), [0, 0, 0, 0]);
    }
}
