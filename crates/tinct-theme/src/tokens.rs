#![forbid(unsafe_code)]

//! Theme tokens and the editor state built from them.
//!
//! A theme is two flat maps of token name → CSS value, one per mode. The
//! token set is closed: [`COLOR_TOKENS`] plus [`COMMON_STYLES`].
//!
//! # Common styles
//!
//! Fonts, radius, shadow geometry, letter spacing and spacing do not depend
//! on the mode. Their value always comes from the light map and is mirrored
//! into dark. [`is_common_style`] is the single place that decides which keys
//! behave this way; apply, generation, preset merging and HSL adjustment all
//! consult it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tinct_color::HslAdjustments;

/// Token name → CSS value for one mode.
pub type ThemeStyleProps = BTreeMap<String, String>;

/// Color tokens, in the order generators emit them.
pub const COLOR_TOKENS: &[&str] = &[
    "background",
    "foreground",
    "card",
    "card-foreground",
    "popover",
    "popover-foreground",
    "primary",
    "primary-foreground",
    "secondary",
    "secondary-foreground",
    "muted",
    "muted-foreground",
    "accent",
    "accent-foreground",
    "destructive",
    "destructive-foreground",
    "border",
    "input",
    "ring",
    "chart-1",
    "chart-2",
    "chart-3",
    "chart-4",
    "chart-5",
    "sidebar",
    "sidebar-foreground",
    "sidebar-primary",
    "sidebar-primary-foreground",
    "sidebar-accent",
    "sidebar-accent-foreground",
    "sidebar-border",
    "sidebar-ring",
    "shadow-color",
];

/// Mode-independent tokens. Their light value is authoritative.
pub const COMMON_STYLES: &[&str] = &[
    "font-sans",
    "font-serif",
    "font-mono",
    "radius",
    "shadow-opacity",
    "shadow-blur",
    "shadow-spread",
    "shadow-offset-x",
    "shadow-offset-y",
    "letter-spacing",
    "spacing",
];

#[must_use]
pub fn is_common_style(key: &str) -> bool {
    COMMON_STYLES.contains(&key)
}

#[must_use]
pub fn is_color_token(key: &str) -> bool {
    COLOR_TOKENS.contains(&key)
}

#[must_use]
pub fn is_known_token(key: &str) -> bool {
    is_color_token(key) || is_common_style(key)
}

/// Every token name: colors first, then common styles.
pub fn all_tokens() -> impl Iterator<Item = &'static str> {
    COLOR_TOKENS.iter().chain(COMMON_STYLES).copied()
}

/// Which half of a theme is being viewed or edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Both modes of a theme. Neither is ever absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemeStyles {
    pub light: ThemeStyleProps,
    pub dark: ThemeStyleProps,
}

impl ThemeStyles {
    #[must_use]
    pub fn new(light: ThemeStyleProps, dark: ThemeStyleProps) -> Self {
        Self { light, dark }
    }

    #[must_use]
    pub fn mode(&self, mode: ThemeMode) -> &ThemeStyleProps {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    pub fn mode_mut(&mut self, mode: ThemeMode) -> &mut ThemeStyleProps {
        match mode {
            ThemeMode::Light => &mut self.light,
            ThemeMode::Dark => &mut self.dark,
        }
    }

    /// Resolve a token for a mode; common tokens always read from light.
    #[must_use]
    pub fn get(&self, mode: ThemeMode, key: &str) -> Option<&str> {
        let source = if is_common_style(key) {
            &self.light
        } else {
            self.mode(mode)
        };
        source.get(key).map(String::as_str)
    }

    /// Write a token. Common tokens are written to both modes.
    pub fn set(&mut self, mode: ThemeMode, key: &str, value: impl Into<String>) {
        let value = value.into();
        if is_common_style(key) {
            self.dark.insert(key.to_string(), value.clone());
            self.light.insert(key.to_string(), value);
        } else {
            self.mode_mut(mode).insert(key.to_string(), value);
        }
    }

    /// Copy every common token present in light over the dark map.
    pub fn mirror_common_styles(&mut self) {
        for key in COMMON_STYLES {
            if let Some(value) = self.light.get(*key) {
                self.dark.insert((*key).to_string(), value.clone());
            }
        }
    }
}

/// Everything the editor is currently showing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeEditorState {
    pub styles: ThemeStyles,
    pub current_mode: ThemeMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsl_adjustments: Option<HslAdjustments>,
}

impl ThemeEditorState {
    #[must_use]
    pub fn new(styles: ThemeStyles) -> Self {
        Self {
            styles,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ThemeMode) -> Self {
        self.current_mode = mode;
        self
    }

    #[must_use]
    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    /// Token map of the active mode.
    #[must_use]
    pub fn active_styles(&self) -> &ThemeStyleProps {
        self.styles.mode(self.current_mode)
    }

    /// Adjustments in effect; a missing triple is neutral.
    #[must_use]
    pub fn effective_hsl_adjustments(&self) -> HslAdjustments {
        self.hsl_adjustments.unwrap_or_default()
    }

    /// Equal in everything except `current_mode`.
    #[must_use]
    pub fn same_theme(&self, other: &Self) -> bool {
        self.styles == other.styles
            && self.preset == other.preset
            && self.hsl_adjustments == other.hsl_adjustments
    }

    /// True when `other` is this state viewed in the other mode.
    #[must_use]
    pub fn differs_only_in_mode(&self, other: &Self) -> bool {
        self.current_mode != other.current_mode && self.same_theme(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_sets_are_disjoint() {
        for key in COMMON_STYLES {
            assert!(!is_color_token(key), "{key} listed twice");
        }
        assert_eq!(all_tokens().count(), COLOR_TOKENS.len() + COMMON_STYLES.len());
    }

    #[test]
    fn shadow_color_is_per_mode_but_geometry_is_common() {
        assert!(is_color_token("shadow-color"));
        assert!(!is_common_style("shadow-color"));
        assert!(is_common_style("shadow-blur"));
        assert!(!is_known_token("shadow-2xl"));
    }

    #[test]
    fn common_tokens_read_from_light() {
        let mut styles = ThemeStyles::default();
        styles.light.insert("radius".into(), "0.5rem".into());
        styles.dark.insert("radius".into(), "2rem".into());
        assert_eq!(styles.get(ThemeMode::Dark, "radius"), Some("0.5rem"));
    }

    #[test]
    fn setting_a_common_token_writes_both_modes() {
        let mut styles = ThemeStyles::default();
        styles.set(ThemeMode::Dark, "font-sans", "Inter, sans-serif");
        styles.set(ThemeMode::Dark, "primary", "#000000");
        assert_eq!(styles.light["font-sans"], "Inter, sans-serif");
        assert_eq!(styles.dark["font-sans"], "Inter, sans-serif");
        assert!(!styles.light.contains_key("primary"));
        assert_eq!(styles.dark["primary"], "#000000");
    }

    #[test]
    fn mirror_copies_only_common_keys() {
        let mut styles = ThemeStyles::default();
        styles.light.insert("spacing".into(), "0.3rem".into());
        styles.light.insert("primary".into(), "#111111".into());
        styles.mirror_common_styles();
        assert_eq!(styles.dark.get("spacing").map(String::as_str), Some("0.3rem"));
        assert!(!styles.dark.contains_key("primary"));
    }

    #[test]
    fn mode_only_difference_is_detected() {
        let light = ThemeEditorState::default();
        let dark = light.clone().with_mode(ThemeMode::Dark);
        assert!(light.differs_only_in_mode(&dark));
        assert!(!light.differs_only_in_mode(&light));

        let mut edited = dark.clone();
        edited.styles.set(ThemeMode::Light, "primary", "red");
        assert!(!light.differs_only_in_mode(&edited));
    }

    #[test]
    fn state_serializes_camel_case() {
        let state = ThemeEditorState::default().with_preset("default");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["currentMode"], "light");
        assert_eq!(json["preset"], "default");
        assert!(json.get("hslAdjustments").is_none());
    }
}
