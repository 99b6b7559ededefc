#![forbid(unsafe_code)]

//! Default theme: the neutral shadcn palette in OKLCH.
//!
//! Every preset is layered on top of these values, so both tables cover the
//! full closed token set.

use crate::tokens::{ThemeEditorState, ThemeMode, ThemeStyleProps, ThemeStyles};

/// Name of the preset that resolves to the defaults themselves.
pub const DEFAULT_PRESET: &str = "default";

const LIGHT_COLORS: &[(&str, &str)] = &[
    ("background", "oklch(1 0 0)"),
    ("foreground", "oklch(0.145 0 0)"),
    ("card", "oklch(1 0 0)"),
    ("card-foreground", "oklch(0.145 0 0)"),
    ("popover", "oklch(1 0 0)"),
    ("popover-foreground", "oklch(0.145 0 0)"),
    ("primary", "oklch(0.205 0 0)"),
    ("primary-foreground", "oklch(0.985 0 0)"),
    ("secondary", "oklch(0.97 0 0)"),
    ("secondary-foreground", "oklch(0.205 0 0)"),
    ("muted", "oklch(0.97 0 0)"),
    ("muted-foreground", "oklch(0.556 0 0)"),
    ("accent", "oklch(0.97 0 0)"),
    ("accent-foreground", "oklch(0.205 0 0)"),
    ("destructive", "oklch(0.577 0.245 27.325)"),
    ("destructive-foreground", "oklch(1 0 0)"),
    ("border", "oklch(0.922 0 0)"),
    ("input", "oklch(0.922 0 0)"),
    ("ring", "oklch(0.708 0 0)"),
    ("chart-1", "oklch(0.81 0.1 252)"),
    ("chart-2", "oklch(0.62 0.19 260)"),
    ("chart-3", "oklch(0.55 0.22 263)"),
    ("chart-4", "oklch(0.49 0.22 264)"),
    ("chart-5", "oklch(0.42 0.18 266)"),
    ("sidebar", "oklch(0.985 0 0)"),
    ("sidebar-foreground", "oklch(0.145 0 0)"),
    ("sidebar-primary", "oklch(0.205 0 0)"),
    ("sidebar-primary-foreground", "oklch(0.985 0 0)"),
    ("sidebar-accent", "oklch(0.97 0 0)"),
    ("sidebar-accent-foreground", "oklch(0.205 0 0)"),
    ("sidebar-border", "oklch(0.922 0 0)"),
    ("sidebar-ring", "oklch(0.708 0 0)"),
    ("shadow-color", "oklch(0 0 0)"),
];

const DARK_COLORS: &[(&str, &str)] = &[
    ("background", "oklch(0.145 0 0)"),
    ("foreground", "oklch(0.985 0 0)"),
    ("card", "oklch(0.205 0 0)"),
    ("card-foreground", "oklch(0.985 0 0)"),
    ("popover", "oklch(0.269 0 0)"),
    ("popover-foreground", "oklch(0.985 0 0)"),
    ("primary", "oklch(0.922 0 0)"),
    ("primary-foreground", "oklch(0.205 0 0)"),
    ("secondary", "oklch(0.269 0 0)"),
    ("secondary-foreground", "oklch(0.985 0 0)"),
    ("muted", "oklch(0.269 0 0)"),
    ("muted-foreground", "oklch(0.708 0 0)"),
    ("accent", "oklch(0.371 0 0)"),
    ("accent-foreground", "oklch(0.985 0 0)"),
    ("destructive", "oklch(0.704 0.191 22.216)"),
    ("destructive-foreground", "oklch(0.985 0 0)"),
    ("border", "oklch(0.275 0 0)"),
    ("input", "oklch(0.325 0 0)"),
    ("ring", "oklch(0.556 0 0)"),
    ("chart-1", "oklch(0.81 0.1 252)"),
    ("chart-2", "oklch(0.62 0.19 260)"),
    ("chart-3", "oklch(0.55 0.22 263)"),
    ("chart-4", "oklch(0.49 0.22 264)"),
    ("chart-5", "oklch(0.42 0.18 266)"),
    ("sidebar", "oklch(0.205 0 0)"),
    ("sidebar-foreground", "oklch(0.985 0 0)"),
    ("sidebar-primary", "oklch(0.488 0.243 264.376)"),
    ("sidebar-primary-foreground", "oklch(0.985 0 0)"),
    ("sidebar-accent", "oklch(0.269 0 0)"),
    ("sidebar-accent-foreground", "oklch(0.985 0 0)"),
    ("sidebar-border", "oklch(0.275 0 0)"),
    ("sidebar-ring", "oklch(0.439 0 0)"),
    ("shadow-color", "oklch(0 0 0)"),
];

/// Mode-independent defaults, shared verbatim by both modes.
const COMMON: &[(&str, &str)] = &[
    (
        "font-sans",
        "ui-sans-serif, system-ui, sans-serif, \"Apple Color Emoji\", \"Segoe UI Emoji\", \"Segoe UI Symbol\", \"Noto Color Emoji\"",
    ),
    (
        "font-serif",
        "ui-serif, Georgia, Cambria, \"Times New Roman\", Times, serif",
    ),
    (
        "font-mono",
        "ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, \"Liberation Mono\", \"Courier New\", monospace",
    ),
    ("radius", "0.625rem"),
    ("shadow-opacity", "0.1"),
    ("shadow-blur", "3px"),
    ("shadow-spread", "0px"),
    ("shadow-offset-x", "0"),
    ("shadow-offset-y", "1px"),
    ("letter-spacing", "0em"),
    ("spacing", "0.25rem"),
];

fn build(colors: &[(&str, &str)]) -> ThemeStyleProps {
    colors
        .iter()
        .chain(COMMON)
        .map(|&(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[must_use]
pub fn default_light_theme_styles() -> ThemeStyleProps {
    build(LIGHT_COLORS)
}

#[must_use]
pub fn default_dark_theme_styles() -> ThemeStyleProps {
    build(DARK_COLORS)
}

#[must_use]
pub fn default_theme_styles() -> ThemeStyles {
    ThemeStyles::new(default_light_theme_styles(), default_dark_theme_styles())
}

/// Fresh editor state: default styles, light mode, `default` preset.
#[must_use]
pub fn default_theme_state() -> ThemeEditorState {
    ThemeEditorState::new(default_theme_styles())
        .with_mode(ThemeMode::Light)
        .with_preset(DEFAULT_PRESET)
}

/// Default value of a single token in the given mode.
#[must_use]
pub fn default_token(mode: ThemeMode, key: &str) -> Option<&'static str> {
    let colors = match mode {
        ThemeMode::Light => LIGHT_COLORS,
        ThemeMode::Dark => DARK_COLORS,
    };
    colors
        .iter()
        .chain(COMMON)
        .find(|(name, _)| *name == key)
        .map(|&(_, value)| value)
}
