#![forbid(unsafe_code)]

//! HSL batch adjustment.
//!
//! The editor recolors a whole theme by applying one adjustment triple to
//! every color token. Each color is processed independently:
//!
//! - hue is shifted and wrapped into `[0, 360)`, negative shifts included;
//! - saturation is scaled and clamped to `[0, 1]`;
//! - lightness is scaled and clamped to `[0.1, 1]`, so a batch adjustment
//!   never produces pure black.
//!
//! The same function drives live preview swatches, so it is deterministic
//! and side-effect free.

use crate::error::ColorParseError;
use crate::format::format_hex;
use crate::parse::parse_color;
use crate::space::{Hsl, Rgba, normalize_hue};

/// Lower bound applied to lightness after scaling.
pub const MIN_ADJUSTED_LIGHTNESS: f64 = 0.1;

/// A hue shift plus saturation and lightness multipliers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HslAdjustments {
    /// Degrees added to the hue.
    pub hue_shift: f64,
    pub saturation_scale: f64,
    pub lightness_scale: f64,
}

impl HslAdjustments {
    /// The identity adjustment.
    pub const NEUTRAL: Self = Self {
        hue_shift: 0.0,
        saturation_scale: 1.0,
        lightness_scale: 1.0,
    };

    #[must_use]
    pub const fn new(hue_shift: f64, saturation_scale: f64, lightness_scale: f64) -> Self {
        Self {
            hue_shift,
            saturation_scale,
            lightness_scale,
        }
    }

    #[must_use]
    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

impl Default for HslAdjustments {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Shift a hue and wrap it into `[0, 360)`. A missing hue counts as `0`
/// and a non-finite shift counts as no shift.
#[must_use]
pub fn shift_hue(hue: Option<f64>, shift: f64) -> f64 {
    let shift = if shift.is_finite() { shift } else { 0.0 };
    normalize_hue(hue.unwrap_or(0.0) + shift)
}

/// Apply an adjustment triple in HSL space.
#[must_use]
pub fn adjust_hsl(hsl: Hsl, hue_shift: f64, saturation_scale: f64, lightness_scale: f64) -> Hsl {
    Hsl {
        h: Some(shift_hue(hsl.h, hue_shift)),
        s: (hsl.s * saturation_scale).clamp(0.0, 1.0),
        l: (hsl.l * lightness_scale).clamp(MIN_ADJUSTED_LIGHTNESS, 1.0),
        alpha: hsl.alpha,
    }
}

#[must_use]
pub fn adjust_rgba_by_hsl(
    color: Rgba,
    hue_shift: f64,
    saturation_scale: f64,
    lightness_scale: f64,
) -> Rgba {
    adjust_hsl(
        color.clamped().to_hsl(),
        hue_shift,
        saturation_scale,
        lightness_scale,
    )
    .to_rgba()
}

/// Strict variant of [`adjust_color_by_hsl`].
pub fn try_adjust_color_by_hsl(
    color: &str,
    hue_shift: f64,
    saturation_scale: f64,
    lightness_scale: f64,
) -> Result<String, ColorParseError> {
    let rgba = parse_color(color)?;
    Ok(format_hex(adjust_rgba_by_hsl(
        rgba,
        hue_shift,
        saturation_scale,
        lightness_scale,
    )))
}

/// Adjust a CSS color and return it as hex.
///
/// Unparseable input is logged and returned unchanged.
#[must_use]
pub fn adjust_color_by_hsl(
    color: &str,
    hue_shift: f64,
    saturation_scale: f64,
    lightness_scale: f64,
) -> String {
    match try_adjust_color_by_hsl(color, hue_shift, saturation_scale, lightness_scale) {
        Ok(adjusted) => adjusted,
        Err(err) => {
            tracing::warn!(color, error = %err, "hsl adjustment skipped");
            color.to_string()
        }
    }
}
