#![forbid(unsafe_code)]

//! WCAG 2.x contrast utilities.
//!
//! Relative luminance uses the sRGB coefficients `0.2126 / 0.7152 / 0.0722`
//! on linearized channels; the contrast ratio is
//! `(max(L1, L2) + 0.05) / (min(L1, L2) + 0.05)`, so it always lies in
//! `1.0..=21.0`. Alpha is ignored.

use crate::error::ColorParseError;
use crate::parse::parse_color;
use crate::space::Rgba;

/// Minimum ratio for normal text at level AA.
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;
/// Minimum ratio for large text at level AA.
pub const WCAG_AA_LARGE_TEXT: f64 = 3.0;
/// Minimum ratio for normal text at level AAA.
pub const WCAG_AAA_NORMAL_TEXT: f64 = 7.0;
/// Minimum ratio for large text at level AAA.
pub const WCAG_AAA_LARGE_TEXT: f64 = 4.5;

/// Label returned when either color fails to parse.
const WORST_CASE_RATIO: &str = "1.00";

/// Highest WCAG level a ratio satisfies for normal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContrastLevel {
    Fail,
    /// Passes only for large text.
    AaLarge,
    Aa,
    Aaa,
}

impl ContrastLevel {
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= WCAG_AAA_NORMAL_TEXT {
            Self::Aaa
        } else if ratio >= WCAG_AA_NORMAL_TEXT {
            Self::Aa
        } else if ratio >= WCAG_AA_LARGE_TEXT {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fail => "Fail",
            Self::AaLarge => "AA Large",
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        }
    }
}

/// WCAG relative luminance of a color (gamut-clamped).
#[must_use]
pub fn relative_luminance(color: Rgba) -> f64 {
    let [r, g, b] = color.clamped().to_linear();
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

#[must_use]
pub fn contrast_ratio(fg: Rgba, bg: Rgba) -> f64 {
    let l1 = relative_luminance(fg);
    let l2 = relative_luminance(bg);
    (l1.max(l2) + 0.05) / (l1.min(l2) + 0.05)
}

/// Contrast ratio between two CSS color strings.
pub fn try_contrast_ratio(fg: &str, bg: &str) -> Result<f64, ColorParseError> {
    Ok(contrast_ratio(parse_color(fg)?, parse_color(bg)?))
}

/// Contrast ratio formatted to two decimals.
///
/// Parse failures of either color yield `"1.00"`, the worst possible ratio.
#[must_use]
pub fn get_contrast_ratio(fg: &str, bg: &str) -> String {
    match try_contrast_ratio(fg, bg) {
        Ok(ratio) => format!("{ratio:.2}"),
        Err(err) => {
            tracing::warn!(fg, bg, error = %err, "contrast check failed");
            WORST_CASE_RATIO.to_string()
        }
    }
}

#[must_use]
pub fn meets_wcag_aa(ratio: f64) -> bool {
    ratio >= WCAG_AA_NORMAL_TEXT
}

#[must_use]
pub fn meets_wcag_aa_large_text(ratio: f64) -> bool {
    ratio >= WCAG_AA_LARGE_TEXT
}

#[must_use]
pub fn meets_wcag_aaa(ratio: f64) -> bool {
    ratio >= WCAG_AAA_NORMAL_TEXT
}

/// Pick the candidate with the highest contrast against `bg`.
///
/// Returns `None` for an empty candidate list. Ties keep the earlier
/// candidate.
#[must_use]
pub fn best_text_color(bg: Rgba, candidates: &[Rgba]) -> Option<Rgba> {
    let (first, rest) = candidates.split_first()?;
    let mut best = *first;
    let mut best_ratio = contrast_ratio(best, bg);
    for &candidate in rest {
        let ratio = contrast_ratio(candidate, bg);
        if ratio > best_ratio {
            best = candidate;
            best_ratio = ratio;
        }
    }
    Some(best)
}
