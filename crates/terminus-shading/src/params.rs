//! Shading parameters supplied by the layer configuration.

use serde::{Deserialize, Serialize};

use crate::color::Rgba8;

/// Everything the overlay needs to turn a solar altitude into a color.
///
/// Values are not range-checked. Out-of-range opacity or attenuation and
/// negative step counts are absorbed by the shading formulas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingParameters {
    /// Overall overlay opacity, nominally `[0, 1]`.
    pub opacity: f64,
    /// Color of full night.
    #[serde(alias = "color")]
    pub night_color: Rgba8,
    /// Color of full day.
    pub daytime_color: Rgba8,
    /// Number of discrete twilight bands; 0 (or negative) for a continuous gradient.
    pub twilight_steps: i32,
    /// Brightness lost per twilight band (or per 6° of depression in continuous mode).
    pub twilight_attenuation: f64,
}

impl Default for ShadingParameters {
    fn default() -> Self {
        Self {
            opacity: 0.5,
            night_color: Rgba8::BLACK,
            daytime_color: Rgba8::TRANSPARENT,
            twilight_steps: 0,
            twilight_attenuation: 0.5,
        }
    }
}

impl ShadingParameters {
    /// The subset of parameters that drives brightness.
    pub fn twilight(&self) -> TwilightParams {
        TwilightParams {
            steps: self.twilight_steps,
            attenuation: self.twilight_attenuation,
        }
    }
}

/// Parameters of the brightness model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TwilightParams {
    /// Number of discrete twilight bands; `<= 0` means continuous.
    pub steps: i32,
    /// Attenuation per band, nominally `[0, 1]`.
    pub attenuation: f64,
}

impl TwilightParams {
    pub const fn continuous(attenuation: f64) -> Self {
        Self {
            steps: 0,
            attenuation,
        }
    }

    pub const fn stepped(steps: i32, attenuation: f64) -> Self {
        Self { steps, attenuation }
    }

    /// Whether brightness is quantized into discrete bands.
    pub fn is_stepped(&self) -> bool {
        self.steps > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = ShadingParameters::default();
        assert_eq!(p.opacity, 0.5);
        assert_eq!(p.night_color, Rgba8::BLACK);
        assert_eq!(p.daytime_color, Rgba8::TRANSPARENT);
        assert_eq!(p.twilight_steps, 0);
        assert_eq!(p.twilight_attenuation, 0.5);
    }

    #[test]
    fn test_negative_steps_are_continuous() {
        assert!(!TwilightParams::stepped(-3, 0.5).is_stepped());
        assert!(!TwilightParams::continuous(0.5).is_stepped());
        assert!(TwilightParams::stepped(1, 0.5).is_stepped());
    }

    #[test]
    fn test_twilight_subset() {
        let p = ShadingParameters {
            twilight_steps: 4,
            twilight_attenuation: 0.25,
            ..Default::default()
        };
        assert_eq!(p.twilight(), TwilightParams::stepped(4, 0.25));
    }
}
