#![forbid(unsafe_code)]

//! Color primitives for Tinct.
//!
//! # Role in Tinct
//! `tinct-color` is the shared color vocabulary of the theme editor. The
//! theme crate stores every color token as a CSS string; this crate turns
//! those strings into numeric colors, moves them between color spaces, and
//! serializes them back in the format a generator asks for.
//!
//! # This crate provides
//! - [`parse_color`] for CSS color strings (hex, `rgb()`, `hsl()`, `oklch()`,
//!   named colors).
//! - [`Rgba`], [`Hsl`], and [`Oklch`] with lossless conversions between them.
//! - [`color_formatter`] for fail-soft re-serialization into
//!   [`ColorFormat`] targets, honoring the [`TailwindVersion`] convention.
//! - [`adjust_color_by_hsl`] for batch recoloring.
//! - WCAG relative luminance and contrast ratio helpers.
//!
//! Everything here is a pure function of its inputs.

/// HSL batch adjustment of colors.
pub mod adjust;
/// WCAG contrast utilities.
pub mod contrast;
/// Color parse errors.
pub mod error;
/// Serialization into CSS color syntaxes.
pub mod format;
/// CSS color string parsing.
pub mod parse;
/// Color spaces and conversions.
pub mod space;

pub use adjust::{
    HslAdjustments, adjust_color_by_hsl, adjust_hsl, adjust_rgba_by_hsl, shift_hue,
    try_adjust_color_by_hsl,
};
pub use contrast::{
    ContrastLevel, WCAG_AA_LARGE_TEXT, WCAG_AA_NORMAL_TEXT, WCAG_AAA_LARGE_TEXT,
    WCAG_AAA_NORMAL_TEXT, best_text_color, contrast_ratio, get_contrast_ratio, meets_wcag_aa,
    meets_wcag_aa_large_text, meets_wcag_aaa, relative_luminance, try_contrast_ratio,
};
pub use error::ColorParseError;
pub use format::{
    ColorFormat, TailwindVersion, color_formatter, format_hex, format_hsl, format_number,
    format_oklch, format_rgb, try_format_color,
};
pub use parse::parse_color;
pub use space::{Hsl, Oklch, Rgba};
