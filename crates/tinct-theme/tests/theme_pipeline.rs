//! End-to-end checks across import, presets, generation and apply.

use tinct_color::{ColorFormat, TailwindVersion};
use tinct_theme::{
    ImportError, PresetRegistry, StyledElement, ThemeEditorState, ThemeMode, ThemePreset,
    ThemePresetStyles, apply_theme_to_element, default_theme_styles, generate_theme_code,
    get_preset_theme_styles, import_into_styles, parse_css_input, validate_css_input,
};

#[test]
fn css_import_sample_yields_distinct_hex_colors() {
    let css = ":root{--primary:0 0% 0%;} .dark{--primary:0 0% 100%;}";
    assert_eq!(validate_css_input(css), Ok(()));
    let parsed = parse_css_input(css);
    let light = &parsed.light_colors["primary"];
    let dark = &parsed.dark_colors["primary"];
    assert_eq!(light, "#000000");
    assert_eq!(dark, "#ffffff");
    assert_ne!(light, dark);
}

#[test]
fn shadcn_export_round_trips_through_import() {
    let state = ThemeEditorState::new(get_preset_theme_styles("modern-minimal"));
    let exported = generate_theme_code(&state, ColorFormat::Hsl, TailwindVersion::V3);
    // The v3 export nests blocks inside `@layer base`; the importer only
    // looks for the selectors.
    let parsed = parse_css_input(&exported);
    assert_eq!(parsed.light_colors["primary"], "#3b82f6");
    assert_eq!(parsed.dark_colors["background"], "#171717");
    assert_eq!(parsed.light_colors["radius"], "0.375rem");
}

#[test]
fn rejected_input_reports_one_message() {
    let err = validate_css_input("color: red").unwrap_err();
    assert_eq!(err, ImportError::MissingVariables);
    assert!(err.to_string().starts_with("Invalid CSS format"));
}

#[test]
fn saved_preset_applies_like_a_builtin() {
    let mut registry = PresetRegistry::builtin();
    let mut styles = ThemePresetStyles::default();
    styles.light.insert("primary".into(), "#ea580c".into());
    styles.light.insert("radius".into(), "0rem".into());
    registry
        .add_saved_preset("ember", ThemePreset::new("Ember", styles))
        .unwrap();

    let state = ThemeEditorState::new(registry.preset_theme_styles("ember"))
        .with_mode(ThemeMode::Dark)
        .with_preset("ember");
    let mut root = StyledElement::new();
    apply_theme_to_element(&state, &mut root);
    assert!(root.has_dark_class());
    assert_eq!(root.property("radius"), Some("0rem"));
    // Dark keeps the default dark primary: the preset only set light.
    assert_eq!(
        state.styles.dark["primary"],
        default_theme_styles().dark["primary"]
    );
}

#[test]
fn import_over_preset_keeps_untouched_tokens() {
    let base = get_preset_theme_styles("claymorphism");
    let parsed = parse_css_input(":root { --accent: #123456; }");
    let styles = import_into_styles(&parsed, &base);
    assert_eq!(styles.light["accent"], "#123456");
    assert_eq!(styles.light["primary"], base.light["primary"]);
    assert_eq!(styles.dark, base.dark);
}
