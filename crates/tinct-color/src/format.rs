#![forbid(unsafe_code)]

//! Serialization into CSS color syntaxes.
//!
//! [`color_formatter`] is the entry point generators use: it accepts any
//! string [`parse_color`](crate::parse_color) understands and re-emits it in
//! the requested [`ColorFormat`]. A string that does not parse is logged and
//! returned unchanged so a generator never fails on a single bad token.
//!
//! # Tailwind conventions
//!
//! Tailwind v3 themes store HSL colors as bare triplets (`210 50% 40%`) and
//! wrap them at the use site (`hsl(var(--primary))`). Tailwind v4 stores
//! complete color functions (`hsl(210 50% 40%)`). Only the HSL target depends
//! on the version.

use std::fmt;
use std::str::FromStr;

use crate::error::ColorParseError;
use crate::parse::parse_color;
use crate::space::{Hsl, Oklch, Rgba};

/// Output syntax for a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorFormat {
    Hex,
    Rgb,
    #[default]
    Hsl,
    Oklch,
}

impl ColorFormat {
    pub const ALL: [Self; 4] = [Self::Hex, Self::Rgb, Self::Hsl, Self::Oklch];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
            Self::Oklch => "oklch",
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown color format: {s}"))
    }
}

/// Which Tailwind major version generated CSS targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TailwindVersion {
    #[cfg_attr(feature = "serde", serde(rename = "3"))]
    V3,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "4"))]
    V4,
}

impl TailwindVersion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V3 => "3",
            Self::V4 => "4",
        }
    }
}

impl fmt::Display for TailwindVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TailwindVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches(['v', 'V']) {
            "3" => Ok(Self::V3),
            "4" => Ok(Self::V4),
            other => Err(format!("unsupported tailwind version: {other}")),
        }
    }
}

/// Format a number the way generated CSS expects it.
///
/// Zero, NaN and infinities print as `0`, integers print bare, anything else
/// prints with at most four decimals and no trailing zeros.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    let fixed = format!("{value:.4}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// `#rrggbb`, lowercase. Alpha is dropped.
#[must_use]
pub fn format_hex(color: Rgba) -> String {
    let (r, g, b) = color.to_u8();
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// `rgb(r, g, b)`, or `rgba(r, g, b, a)` when translucent.
#[must_use]
pub fn format_rgb(color: Rgba) -> String {
    let (r, g, b) = color.to_u8();
    let alpha = color.clamped().alpha;
    if alpha < 1.0 {
        format!("rgba({r}, {g}, {b}, {})", format_number(alpha))
    } else {
        format!("rgb({r}, {g}, {b})")
    }
}

/// HSL in the convention of the given Tailwind version.
///
/// The v3 triplet never carries alpha; the v4 function appends `/ a` when
/// the color is translucent.
#[must_use]
pub fn format_hsl(hsl: Hsl, version: TailwindVersion) -> String {
    let triplet = format!(
        "{} {}% {}%",
        format_number(hsl.h.unwrap_or(0.0)),
        format_number(hsl.s * 100.0),
        format_number(hsl.l * 100.0)
    );
    match version {
        TailwindVersion::V3 => triplet,
        TailwindVersion::V4 if hsl.alpha < 1.0 => {
            format!("hsl({triplet} / {})", format_number(hsl.alpha.max(0.0)))
        }
        TailwindVersion::V4 => format!("hsl({triplet})"),
    }
}

/// `oklch(l c h)`, with `/ a` when translucent.
#[must_use]
pub fn format_oklch(oklch: Oklch) -> String {
    let body = format!(
        "{} {} {}",
        format_number(oklch.l),
        format_number(oklch.c),
        format_number(oklch.h.unwrap_or(0.0))
    );
    if oklch.alpha < 1.0 {
        format!("oklch({body} / {})", format_number(oklch.alpha.max(0.0)))
    } else {
        format!("oklch({body})")
    }
}

/// Strict variant of [`color_formatter`].
pub fn try_format_color(
    value: &str,
    format: ColorFormat,
    version: TailwindVersion,
) -> Result<String, ColorParseError> {
    let color = parse_color(value)?;
    Ok(match format {
        ColorFormat::Hex => format_hex(color),
        ColorFormat::Rgb => format_rgb(color),
        ColorFormat::Hsl => format_hsl(color.clamped().to_hsl(), version),
        ColorFormat::Oklch => format_oklch(color.to_oklch()),
    })
}

/// Re-serialize a CSS color into `format`.
///
/// Unparseable input is logged and returned unchanged.
#[must_use]
pub fn color_formatter(value: &str, format: ColorFormat, version: TailwindVersion) -> String {
    match try_format_color(value, format, version) {
        Ok(formatted) => formatted,
        Err(err) => {
            tracing::warn!(value, %format, error = %err, "color formatting failed");
            value.to_string()
        }
    }
}
