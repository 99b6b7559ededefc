#![forbid(unsafe_code)]

//! Theme model and derivation pipeline for Tinct.
//!
//! # Role in Tinct
//! A theme is two maps of CSS token values, one per mode. This crate owns
//! that model and every pure function that turns it into something else:
//! custom properties on a document root, copy-paste CSS, a Tailwind config,
//! shadow scales and contrast reports. It also owns the inputs that produce
//! themes: defaults, presets and CSS import.
//!
//! The editor state machine lives in `tinct-editor`; nothing here keeps
//! state between calls except the preset registry and font search tracker,
//! which the caller owns.
//!
//! # Key types
//! - [`ThemeEditorState`] / [`ThemeStyles`]: the theme being edited.
//! - [`PresetRegistry`]: built-in and saved presets.
//! - [`ShadowMap`]: the eight elevation levels of one mode.
//! - [`ThemeTarget`]: where [`apply_theme_to_element`] writes.

pub mod apply;
pub mod contrast;
pub mod defaults;
pub mod error;
pub mod fonts;
pub mod generator;
pub mod import;
pub mod presets;
pub mod shadows;
pub mod tokens;

pub use apply::{StyledElement, ThemeTarget, apply_style_to_element, apply_theme_to_element};
pub use contrast::{CONTRAST_PAIRS, ContrastCheck, ContrastPair, contrast_report};
pub use defaults::{
    DEFAULT_PRESET, default_dark_theme_styles, default_light_theme_styles, default_theme_state,
    default_theme_styles,
};
pub use error::{ImportError, PresetError};
pub use fonts::{
    FontCatalog, FontCategory, FontInfo, FontPage, FontQuery, FontRequest, FontSearch,
    SearchTicket, build_font_family, extract_font_family,
};
pub use generator::{generate_tailwind_config_code, generate_theme_code};
pub use import::{ParsedCss, import_into_styles, parse_css_input, validate_css_input};
pub use presets::{
    PresetRegistry, PresetSource, ThemePreset, ThemePresetStyles, get_preset_theme_styles,
    merge_preset_styles, preset_swatches,
};
pub use shadows::{ShadowLevel, ShadowMap, ShadowParams, get_shadow_map, shadow_map_for};
pub use tokens::{
    COLOR_TOKENS, COMMON_STYLES, ThemeEditorState, ThemeMode, ThemeStyleProps, ThemeStyles,
    is_color_token, is_common_style, is_known_token,
};

#[cfg(test)]
mod tests {
    use super::*;
    use tinct_color::{ColorFormat, TailwindVersion};

    #[test]
    fn imported_css_flows_into_generated_css() {
        let parsed = parse_css_input(":root { --primary: 0 100% 50%; } .dark { --primary: 240 100% 50%; }");
        let styles = import_into_styles(&parsed, &default_theme_styles());
        let state = ThemeEditorState::new(styles);
        let code = generate_theme_code(&state, ColorFormat::Hex, TailwindVersion::V4);
        assert!(code.contains("  --primary: #ff0000;\n"));
        assert!(code.contains("  --primary: #0000ff;\n"));
    }

    #[test]
    fn preset_styles_apply_cleanly() {
        let state = ThemeEditorState::new(get_preset_theme_styles("ocean-breeze"))
            .with_preset("ocean-breeze");
        let mut root = StyledElement::new();
        apply_theme_to_element(&state, &mut root);
        assert_eq!(root.property("font-sans"), Some("DM Sans, sans-serif"));
        assert_eq!(root.property("shadow-blur"), Some("8px"));
        assert!(root.property("shadow-lg").unwrap().contains(", 0 4px 6px -2px "));
    }
}
