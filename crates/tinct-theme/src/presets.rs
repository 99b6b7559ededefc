#![forbid(unsafe_code)]

//! Named presets and the merge that turns one into a full theme.
//!
//! A preset only lists the tokens it overrides. Resolving it layers those
//! overrides onto the defaults:
//!
//! ```text
//! light = defaults.light ⊕ preset.light
//! dark  = defaults.dark ⊕ common(preset.light) ⊕ preset.dark
//! ```
//!
//! The middle term carries mode-independent tokens (fonts, radius, shadow
//! geometry) that a preset set only on its light half into dark.
//!
//! The registry holds the built-in presets plus presets the user saved at
//! runtime. Built-ins are immutable.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tinct_color::{HslAdjustments, adjust_color_by_hsl};

use crate::defaults::{DEFAULT_PRESET, default_theme_styles};
use crate::error::PresetError;
use crate::tokens::{ThemeMode, ThemeStyleProps, ThemeStyles, is_common_style};

/// Tokens shown as preview dots on a preset button.
pub const SWATCH_TOKENS: [&str; 4] = ["primary", "secondary", "accent", "border"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresetSource {
    Saved,
    BuiltIn,
}

/// Partial token overrides for each mode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemePresetStyles {
    pub light: ThemeStyleProps,
    pub dark: ThemeStyleProps,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePreset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PresetSource>,
    /// Creation time as an RFC 3339 string, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub styles: ThemePresetStyles,
}

impl ThemePreset {
    #[must_use]
    pub fn new(label: impl Into<String>, styles: ThemePresetStyles) -> Self {
        Self {
            label: Some(label.into()),
            source: None,
            created_at: None,
            styles,
        }
    }

    #[must_use]
    pub fn is_built_in(&self) -> bool {
        self.source == Some(PresetSource::BuiltIn)
    }
}

/// Layer a preset's overrides onto the default theme.
#[must_use]
pub fn merge_preset_styles(preset: &ThemePresetStyles) -> ThemeStyles {
    let mut styles = default_theme_styles();
    styles
        .light
        .extend(preset.light.iter().map(|(k, v)| (k.clone(), v.clone())));
    styles.dark.extend(
        preset
            .light
            .iter()
            .filter(|(key, _)| is_common_style(key))
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    styles
        .dark
        .extend(preset.dark.iter().map(|(k, v)| (k.clone(), v.clone())));
    styles
}

// ── Registry ────────────────────────────────────────────────────────────

/// Built-in and saved presets, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetRegistry {
    presets: BTreeMap<String, ThemePreset>,
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetRegistry {
    /// A registry with no presets at all. `default` still resolves.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            presets: BTreeMap::new(),
        }
    }

    /// A registry holding the built-in presets.
    #[must_use]
    pub fn builtin() -> Self {
        let presets = BUILTIN_PRESETS
            .iter()
            .map(|def| (def.name.to_string(), def.to_preset()))
            .collect();
        Self { presets }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ThemePreset> {
        self.presets.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn saved(&self) -> impl Iterator<Item = (&str, &ThemePreset)> {
        self.presets
            .iter()
            .filter(|(_, preset)| preset.source == Some(PresetSource::Saved))
            .map(|(name, preset)| (name.as_str(), preset))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Add or replace a saved preset. The stored copy is tagged `SAVED`.
    pub fn add_saved_preset(
        &mut self,
        name: impl Into<String>,
        mut preset: ThemePreset,
    ) -> Result<(), PresetError> {
        let name = name.into();
        self.check_saved_name(&name)?;
        preset.source = Some(PresetSource::Saved);
        tracing::debug!(preset = %name, "saved preset registered");
        self.presets.insert(name, preset);
        Ok(())
    }

    fn check_saved_name(&self, name: &str) -> Result<(), PresetError> {
        if name.trim().is_empty() {
            return Err(PresetError::InvalidName {
                name: name.to_string(),
            });
        }
        if name == DEFAULT_PRESET || self.get(name).is_some_and(ThemePreset::is_built_in) {
            return Err(PresetError::built_in(name));
        }
        Ok(())
    }

    pub fn remove_preset(&mut self, name: &str) -> Result<ThemePreset, PresetError> {
        match self.presets.get(name) {
            None => Err(PresetError::not_found(name)),
            Some(preset) if preset.is_built_in() => Err(PresetError::built_in(name)),
            Some(_) => {
                tracing::debug!(preset = %name, "saved preset removed");
                self.presets
                    .remove(name)
                    .ok_or_else(|| PresetError::not_found(name))
            }
        }
    }

    /// Register every preset of a JSON object `{ name: preset, ... }` as
    /// saved. Returns how many were added. Nothing is registered unless
    /// every name is accepted.
    pub fn load_saved_json(&mut self, json: &str) -> Result<usize, PresetError> {
        let incoming: BTreeMap<String, ThemePreset> = serde_json::from_str(json)?;
        for name in incoming.keys() {
            self.check_saved_name(name)?;
        }
        let count = incoming.len();
        for (name, preset) in incoming {
            self.add_saved_preset(name, preset)?;
        }
        Ok(count)
    }

    /// Serialize the saved presets as a JSON object.
    pub fn saved_to_json(&self) -> Result<String, PresetError> {
        let saved: BTreeMap<&str, &ThemePreset> = self.saved().collect();
        Ok(serde_json::to_string_pretty(&saved)?)
    }

    /// Full styles for a preset. `default` and unknown names resolve to the
    /// default theme.
    #[must_use]
    pub fn preset_theme_styles(&self, name: &str) -> ThemeStyles {
        if name == DEFAULT_PRESET {
            return default_theme_styles();
        }
        match self.get(name) {
            Some(preset) => merge_preset_styles(&preset.styles),
            None => {
                tracing::warn!(preset = %name, "unknown preset, using defaults");
                default_theme_styles()
            }
        }
    }

    /// Preview colors for a preset button, recolored by `adjustments`.
    #[must_use]
    pub fn preset_swatches(
        &self,
        name: &str,
        mode: ThemeMode,
        adjustments: &HslAdjustments,
    ) -> Vec<(&'static str, String)> {
        let styles = self.preset_theme_styles(name);
        let props = styles.mode(mode);
        SWATCH_TOKENS
            .iter()
            .filter_map(|&key| {
                let value = props.get(key)?;
                let color = if adjustments.is_neutral() {
                    value.clone()
                } else {
                    adjust_color_by_hsl(
                        value,
                        adjustments.hue_shift,
                        adjustments.saturation_scale,
                        adjustments.lightness_scale,
                    )
                };
                Some((key, color))
            })
            .collect()
    }
}

static BUILTIN: LazyLock<PresetRegistry> = LazyLock::new(PresetRegistry::builtin);

/// Full styles for a built-in preset.
#[must_use]
pub fn get_preset_theme_styles(name: &str) -> ThemeStyles {
    BUILTIN.preset_theme_styles(name)
}

/// Preview swatches for a built-in preset.
#[must_use]
pub fn preset_swatches(
    name: &str,
    mode: ThemeMode,
    adjustments: &HslAdjustments,
) -> Vec<(&'static str, String)> {
    BUILTIN.preset_swatches(name, mode, adjustments)
}

// ── Built-in tables ─────────────────────────────────────────────────────

struct BuiltinPreset {
    name: &'static str,
    label: &'static str,
    light: &'static [(&'static str, &'static str)],
    dark: &'static [(&'static str, &'static str)],
}

impl BuiltinPreset {
    fn to_preset(&self) -> ThemePreset {
        let props = |pairs: &[(&str, &str)]| -> ThemeStyleProps {
            pairs
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };
        ThemePreset {
            label: Some(self.label.to_string()),
            source: Some(PresetSource::BuiltIn),
            created_at: None,
            styles: ThemePresetStyles {
                light: props(self.light),
                dark: props(self.dark),
            },
        }
    }
}

const BUILTIN_PRESETS: &[BuiltinPreset] = &[
    BuiltinPreset {
        name: DEFAULT_PRESET,
        label: "Default",
        light: &[],
        dark: &[],
    },
    BuiltinPreset {
        name: "modern-minimal",
        label: "Modern Minimal",
        light: &[
            ("background", "#ffffff"),
            ("foreground", "#333333"),
            ("primary", "#3b82f6"),
            ("primary-foreground", "#ffffff"),
            ("secondary", "#f3f4f6"),
            ("secondary-foreground", "#4b5563"),
            ("accent", "#e0f2fe"),
            ("accent-foreground", "#1e3a8a"),
            ("border", "#e5e7eb"),
            ("ring", "#3b82f6"),
            ("font-sans", "Inter, sans-serif"),
            ("font-mono", "JetBrains Mono, monospace"),
            ("radius", "0.375rem"),
        ],
        dark: &[
            ("background", "#171717"),
            ("foreground", "#e5e5e5"),
            ("primary", "#3b82f6"),
            ("primary-foreground", "#ffffff"),
            ("secondary", "#262626"),
            ("secondary-foreground", "#e5e5e5"),
            ("accent", "#1e3a8a"),
            ("accent-foreground", "#bfdbfe"),
            ("border", "#404040"),
            ("ring", "#3b82f6"),
        ],
    },
    BuiltinPreset {
        name: "ocean-breeze",
        label: "Ocean Breeze",
        light: &[
            ("background", "#f0f8ff"),
            ("foreground", "#374151"),
            ("primary", "#22c55e"),
            ("primary-foreground", "#ffffff"),
            ("secondary", "#e0f2fe"),
            ("secondary-foreground", "#4b5563"),
            ("accent", "#d1fae5"),
            ("accent-foreground", "#374151"),
            ("border", "#e5e7eb"),
            ("font-sans", "DM Sans, sans-serif"),
            ("font-serif", "Lora, serif"),
            ("radius", "0.5rem"),
            ("shadow-opacity", "0.1"),
            ("shadow-blur", "8px"),
            ("shadow-offset-y", "4px"),
            ("shadow-spread", "-1px"),
        ],
        dark: &[
            ("background", "#0f172a"),
            ("foreground", "#d1d5db"),
            ("primary", "#34d399"),
            ("primary-foreground", "#0f172a"),
            ("secondary", "#2d3748"),
            ("secondary-foreground", "#a1a1aa"),
            ("accent", "#374151"),
            ("accent-foreground", "#a1a1aa"),
            ("border", "#4b5563"),
        ],
    },
    BuiltinPreset {
        name: "amber-minimal",
        label: "Amber Minimal",
        light: &[
            ("primary", "#f59e0b"),
            ("primary-foreground", "#000000"),
            ("secondary", "#f3f4f6"),
            ("secondary-foreground", "#4b5563"),
            ("accent", "#fffbeb"),
            ("accent-foreground", "#92400e"),
            ("border", "#e5e7eb"),
            ("ring", "#f59e0b"),
            ("font-sans", "Inter, sans-serif"),
            ("font-serif", "Source Serif 4, serif"),
            ("radius", "0.375rem"),
        ],
        dark: &[
            ("background", "#171717"),
            ("foreground", "#e5e5e5"),
            ("primary", "#f59e0b"),
            ("primary-foreground", "#000000"),
            ("secondary", "#262626"),
            ("secondary-foreground", "#e5e5e5"),
            ("accent", "#92400e"),
            ("accent-foreground", "#fde68a"),
            ("border", "#404040"),
            ("ring", "#f59e0b"),
        ],
    },
    BuiltinPreset {
        name: "claymorphism",
        label: "Claymorphism",
        light: &[
            ("background", "#e7e5e4"),
            ("foreground", "#1e293b"),
            ("primary", "#6366f1"),
            ("primary-foreground", "#ffffff"),
            ("secondary", "#d6d3d1"),
            ("secondary-foreground", "#4b5563"),
            ("accent", "#f3e5f5"),
            ("accent-foreground", "#374151"),
            ("border", "#d6d3d1"),
            ("font-sans", "Plus Jakarta Sans, sans-serif"),
            ("font-serif", "Lora, serif"),
            ("font-mono", "Roboto Mono, monospace"),
            ("radius", "1.25rem"),
            ("shadow-color", "hsl(240 4% 60%)"),
            ("shadow-opacity", "0.18"),
            ("shadow-blur", "10px"),
            ("shadow-offset-x", "2px"),
            ("shadow-offset-y", "2px"),
            ("shadow-spread", "4px"),
        ],
        dark: &[
            ("background", "#1e1b18"),
            ("foreground", "#e2e8f0"),
            ("primary", "#818cf8"),
            ("primary-foreground", "#1e1b18"),
            ("secondary", "#3a3633"),
            ("secondary-foreground", "#d1d5db"),
            ("accent", "#484441"),
            ("accent-foreground", "#d1d5db"),
            ("border", "#3a3633"),
            ("shadow-color", "hsl(0 0% 0%)"),
        ],
    },
    BuiltinPreset {
        name: "mono",
        label: "Mono",
        light: &[
            ("primary", "oklch(0.556 0 0)"),
            ("primary-foreground", "oklch(0.985 0 0)"),
            ("accent", "oklch(0.97 0 0)"),
            ("accent-foreground", "oklch(0.205 0 0)"),
            ("font-sans", "Geist Mono, monospace"),
            ("font-serif", "Geist Mono, monospace"),
            ("font-mono", "Geist Mono, monospace"),
            ("radius", "0rem"),
            ("shadow-opacity", "0"),
            ("shadow-blur", "0px"),
        ],
        dark: &[
            ("primary", "oklch(0.556 0 0)"),
            ("primary-foreground", "oklch(0.985 0 0)"),
            ("accent", "oklch(0.371 0 0)"),
            ("accent-foreground", "oklch(0.985 0 0)"),
        ],
    },
];
