#![forbid(unsafe_code)]

//! Elevation shadows derived from the shadow geometry tokens.
//!
//! Six tokens (`shadow-color`, `shadow-opacity`, `shadow-blur`,
//! `shadow-spread`, `shadow-offset-x`, `shadow-offset-y`) expand into eight
//! `box-shadow` values, `shadow-2xs` through `shadow-2xl`.
//!
//! - `2xs`, `xs` and `2xl` are one layer of the base geometry with the
//!   opacity scaled by 0.5, 0.5 and 2.5.
//! - `sm`, `shadow`, `md`, `lg` and `xl` add a second layer: same x offset,
//!   a fixed y offset and blur per level, spread one pixel tighter, full
//!   opacity.
//!
//! Colors are emitted as `hsl(<h s% l%> / <alpha>)` with the alpha at two
//! decimals.

use tinct_color::{ColorFormat, TailwindVersion, color_formatter, format_number};

use crate::defaults::default_token;
use crate::tokens::{ThemeEditorState, ThemeMode, ThemeStyles};

/// Opacity used when `shadow-opacity` is not a number.
const FALLBACK_OPACITY: f64 = 0.1;

/// One of the eight elevation levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShadowLevel {
    TwoXs,
    Xs,
    Sm,
    Base,
    Md,
    Lg,
    Xl,
    TwoXl,
}

impl ShadowLevel {
    pub const ALL: [Self; 8] = [
        Self::TwoXs,
        Self::Xs,
        Self::Sm,
        Self::Base,
        Self::Md,
        Self::Lg,
        Self::Xl,
        Self::TwoXl,
    ];

    /// Custom property name without the leading `--`.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::TwoXs => "shadow-2xs",
            Self::Xs => "shadow-xs",
            Self::Sm => "shadow-sm",
            Self::Base => "shadow",
            Self::Md => "shadow-md",
            Self::Lg => "shadow-lg",
            Self::Xl => "shadow-xl",
            Self::TwoXl => "shadow-2xl",
        }
    }

    /// Key used in a Tailwind `boxShadow` scale.
    #[must_use]
    pub const fn scale_key(self) -> &'static str {
        match self {
            Self::TwoXs => "2xs",
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Base => "DEFAULT",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::TwoXl => "2xl",
        }
    }

    /// Opacity multiplier of the base layer.
    #[must_use]
    pub const fn opacity_multiplier(self) -> f64 {
        match self {
            Self::TwoXs | Self::Xs => 0.5,
            Self::TwoXl => 2.5,
            _ => 1.0,
        }
    }

    /// Fixed `(offset-y, blur)` of the second layer, if the level has one.
    #[must_use]
    pub const fn second_layer(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Sm | Self::Base => Some(("1px", "2px")),
            Self::Md => Some(("2px", "4px")),
            Self::Lg => Some(("4px", "6px")),
            Self::Xl => Some(("8px", "10px")),
            Self::TwoXs | Self::Xs | Self::TwoXl => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Resolved shadow geometry for one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowParams {
    pub offset_x: String,
    pub offset_y: String,
    pub blur: String,
    pub spread: String,
    pub opacity: f64,
    /// Bare HSL triplet of `shadow-color`.
    pub color: String,
}

impl ShadowParams {
    /// Read the geometry of `mode`. Missing tokens fall back to the default
    /// theme.
    #[must_use]
    pub fn from_styles(styles: &ThemeStyles, mode: ThemeMode) -> Self {
        let token = |key: &str| -> String {
            styles
                .get(mode, key)
                .or_else(|| default_token(mode, key))
                .unwrap_or_default()
                .to_string()
        };

        let raw_opacity = token("shadow-opacity");
        let opacity = match raw_opacity.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                tracing::warn!(value = %raw_opacity, "invalid shadow-opacity, using fallback");
                FALLBACK_OPACITY
            }
        };

        Self {
            offset_x: token("shadow-offset-x"),
            offset_y: token("shadow-offset-y"),
            blur: token("shadow-blur"),
            spread: token("shadow-spread"),
            opacity,
            color: color_formatter(&token("shadow-color"), ColorFormat::Hsl, TailwindVersion::V3),
        }
    }

    fn color_at(&self, multiplier: f64) -> String {
        format!("hsl({} / {:.2})", self.color, self.opacity * multiplier)
    }

    fn base_layer(&self, multiplier: f64) -> String {
        format!(
            "{} {} {} {} {}",
            self.offset_x,
            self.offset_y,
            self.blur,
            self.spread,
            self.color_at(multiplier)
        )
    }

    fn tight_spread(&self) -> String {
        let spread = leading_number(&self.spread).unwrap_or(0.0);
        format!("{}px", format_number(spread - 1.0))
    }

    /// The `box-shadow` value of one level.
    #[must_use]
    pub fn level(&self, level: ShadowLevel) -> String {
        let base = self.base_layer(level.opacity_multiplier());
        match level.second_layer() {
            None => base,
            Some((offset_y, blur)) => format!(
                "{base}, {} {offset_y} {blur} {} {}",
                self.offset_x,
                self.tight_spread(),
                self.color_at(1.0)
            ),
        }
    }
}

/// The eight elevation values of one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowMap {
    values: [String; 8],
}

impl ShadowMap {
    #[must_use]
    pub fn from_params(params: &ShadowParams) -> Self {
        Self {
            values: ShadowLevel::ALL.map(|level| params.level(level)),
        }
    }

    #[must_use]
    pub fn level(&self, level: ShadowLevel) -> &str {
        &self.values[level.index()]
    }

    /// Look up by custom property name, e.g. `shadow-md`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        ShadowLevel::ALL
            .into_iter()
            .find(|level| level.css_name() == name)
            .map(|level| self.level(level))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// `(level, value)` pairs from smallest to largest.
    pub fn iter(&self) -> impl Iterator<Item = (ShadowLevel, &str)> {
        ShadowLevel::ALL
            .into_iter()
            .zip(self.values.iter().map(String::as_str))
    }
}

/// Shadows of a mode of `styles`.
#[must_use]
pub fn shadow_map_for(styles: &ThemeStyles, mode: ThemeMode) -> ShadowMap {
    ShadowMap::from_params(&ShadowParams::from_styles(styles, mode))
}

/// Shadows of the active mode of `state`.
#[must_use]
pub fn get_shadow_map(state: &ThemeEditorState) -> ShadowMap {
    shadow_map_for(&state.styles, state.current_mode)
}

/// Parse the longest numeric prefix of `input`, ignoring leading
/// whitespace: `"4px"` → `4`, `"-1.5rem"` → `-1.5`, `"px"` → `None`.
pub(crate) fn leading_number(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac = end + 1;
        while frac < bytes.len() && bytes[frac].is_ascii_digit() {
            frac += 1;
        }
        if frac > end + 1 {
            has_digits = true;
            end = frac;
        } else if has_digits {
            end += 1;
        }
    }
    if !has_digits {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let exp_digits = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > exp_digits {
            end = exp;
        }
    }
    s[..end].parse().ok()
}
