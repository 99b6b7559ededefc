#![forbid(unsafe_code)]

//! Copy-paste code generation: CSS variable blocks and a Tailwind config.
//!
//! # Tailwind v3
//!
//! ```css
//! @layer base {
//!   :root {
//!     --background: 0 0% 100%;
//!   }
//!   .dark { ... }
//! }
//! ```
//!
//! # Tailwind v4
//!
//! `:root` and `.dark` at the top level, followed by an `@theme inline`
//! block that maps the variables onto Tailwind's namespaces (`--color-*`,
//! `--font-*`, `--radius-*`, `--shadow-*`, `--tracking-*`).
//!
//! Both versions end with a `body { letter-spacing }` rule when the theme's
//! letter spacing is not `0em`.

use std::fmt::Write as _;

use tinct_color::{ColorFormat, TailwindVersion, color_formatter};

use crate::shadows::{ShadowLevel, shadow_map_for};
use crate::tokens::{COLOR_TOKENS, ThemeEditorState, ThemeMode, ThemeStyles};

const FONT_TOKENS: [&str; 3] = ["font-sans", "font-serif", "font-mono"];

/// Raw shadow variables: output name, token.
const RAW_SHADOW_VARS: [(&str, &str); 5] = [
    ("shadow-x", "shadow-offset-x"),
    ("shadow-y", "shadow-offset-y"),
    ("shadow-blur", "shadow-blur"),
    ("shadow-spread", "shadow-spread"),
    ("shadow-opacity", "shadow-opacity"),
];

const RADIUS_SCALE: [(&str, &str); 4] = [
    ("sm", "calc(var(--radius) - 4px)"),
    ("md", "calc(var(--radius) - 2px)"),
    ("lg", "var(--radius)"),
    ("xl", "calc(var(--radius) + 4px)"),
];

const TRACKING_SCALE: [(&str, &str); 6] = [
    ("tighter", "calc(var(--tracking-normal) - 0.05em)"),
    ("tight", "calc(var(--tracking-normal) - 0.025em)"),
    ("normal", "var(--tracking-normal)"),
    ("wide", "calc(var(--tracking-normal) + 0.025em)"),
    ("wider", "calc(var(--tracking-normal) + 0.05em)"),
    ("widest", "calc(var(--tracking-normal) + 0.1em)"),
];

/// Letter spacing that needs no body rule.
const NEUTRAL_LETTER_SPACING: &str = "0em";

/// Generate the CSS variables of both modes.
#[must_use]
pub fn generate_theme_code(
    state: &ThemeEditorState,
    color_format: ColorFormat,
    tailwind_version: TailwindVersion,
) -> String {
    let styles = &state.styles;
    let mut out = String::new();

    match tailwind_version {
        TailwindVersion::V3 => {
            out.push_str("@layer base {\n");
            write_mode_block(&mut out, styles, ThemeMode::Light, color_format, tailwind_version, "  ");
            out.push('\n');
            write_mode_block(&mut out, styles, ThemeMode::Dark, color_format, tailwind_version, "  ");
            out.push_str("}\n");
        }
        TailwindVersion::V4 => {
            write_mode_block(&mut out, styles, ThemeMode::Light, color_format, tailwind_version, "");
            out.push('\n');
            write_mode_block(&mut out, styles, ThemeMode::Dark, color_format, tailwind_version, "");
            out.push('\n');
            write_theme_inline(&mut out);
        }
    }

    let letter_spacing = styles
        .get(ThemeMode::Light, "letter-spacing")
        .unwrap_or(NEUTRAL_LETTER_SPACING);
    if letter_spacing != NEUTRAL_LETTER_SPACING {
        out.push_str("\n@layer base {\n  body {\n    letter-spacing: var(--tracking-normal);\n  }\n}\n");
    }

    tracing::debug!(
        format = %color_format,
        version = %tailwind_version,
        bytes = out.len(),
        "theme code generated"
    );
    out
}

fn write_mode_block(
    out: &mut String,
    styles: &ThemeStyles,
    mode: ThemeMode,
    color_format: ColorFormat,
    version: TailwindVersion,
    indent: &str,
) {
    let selector = match mode {
        ThemeMode::Light => ":root",
        ThemeMode::Dark => ".dark",
    };
    let token = |key: &str| styles.get(mode, key).unwrap_or_default();
    let color = |key: &str| color_formatter(token(key), color_format, version);

    let _ = writeln!(out, "{indent}{selector} {{");
    let mut decl = |name: &str, value: &str| {
        let _ = writeln!(out, "{indent}  --{name}: {value};");
    };

    for key in COLOR_TOKENS.iter().filter(|key| **key != "shadow-color") {
        decl(key, &color(key));
    }
    for key in FONT_TOKENS {
        decl(key, token(key));
    }
    decl("radius", token("radius"));
    decl("shadow-color", &color("shadow-color"));
    for (name, key) in RAW_SHADOW_VARS {
        decl(name, token(key));
    }
    for (level, shadow) in shadow_map_for(styles, mode).iter() {
        decl(level.css_name(), shadow);
    }
    decl("tracking-normal", token("letter-spacing"));
    if mode == ThemeMode::Light {
        decl("spacing", token("spacing"));
    }

    let _ = writeln!(out, "{indent}}}");
}

fn write_theme_inline(out: &mut String) {
    out.push_str("@theme inline {\n");
    for key in COLOR_TOKENS.iter().filter(|key| **key != "shadow-color") {
        let _ = writeln!(out, "  --color-{key}: var(--{key});");
    }
    out.push('\n');
    for key in FONT_TOKENS {
        let _ = writeln!(out, "  --{key}: var(--{key});");
    }
    out.push('\n');
    for (size, value) in RADIUS_SCALE {
        let _ = writeln!(out, "  --radius-{size}: {value};");
    }
    out.push('\n');
    for level in ShadowLevel::ALL {
        let name = level.css_name();
        let _ = writeln!(out, "  --{name}: var(--{name});");
    }
    out.push('\n');
    for (step, value) in TRACKING_SCALE {
        let _ = writeln!(out, "  --tracking-{step}: {value};");
    }
    out.push_str("}\n");
}

// ── tailwind.config ─────────────────────────────────────────────────────

/// Token groups that nest as `{ DEFAULT, foreground }`.
const PAIRED_COLORS: [&str; 7] = [
    "card",
    "popover",
    "primary",
    "secondary",
    "muted",
    "accent",
    "destructive",
];

const SIDEBAR_COLORS: [(&str, &str); 8] = [
    ("DEFAULT", "sidebar"),
    ("foreground", "sidebar-foreground"),
    ("primary", "sidebar-primary"),
    ("primary-foreground", "sidebar-primary-foreground"),
    ("accent", "sidebar-accent"),
    ("accent-foreground", "sidebar-accent-foreground"),
    ("border", "sidebar-border"),
    ("ring", "sidebar-ring"),
];

/// Generate a Tailwind v3 `tailwind.config.ts` referencing the variables.
#[must_use]
pub fn generate_tailwind_config_code(state: &ThemeEditorState) -> String {
    let styles = &state.styles;
    let hsl_var = |key: &str| format!("\"hsl(var(--{key}))\"");
    let mut out = String::new();

    out.push_str("import type { Config } from \"tailwindcss\";\n\n");
    out.push_str("export default {\n");
    out.push_str("  darkMode: [\"class\"],\n");
    out.push_str(
        "  content: [\"./pages/**/*.{ts,tsx}\", \"./components/**/*.{ts,tsx}\", \"./app/**/*.{ts,tsx}\", \"./src/**/*.{ts,tsx}\"],\n",
    );
    out.push_str("  theme: {\n    extend: {\n      colors: {\n");

    for key in ["background", "foreground"] {
        let _ = writeln!(out, "        {key}: {},", hsl_var(key));
    }
    for key in PAIRED_COLORS {
        let _ = writeln!(out, "        {key}: {{");
        let _ = writeln!(out, "          DEFAULT: {},", hsl_var(key));
        let _ = writeln!(out, "          foreground: {},", hsl_var(&format!("{key}-foreground")));
        out.push_str("        },\n");
    }
    for key in ["border", "input", "ring"] {
        let _ = writeln!(out, "        {key}: {},", hsl_var(key));
    }
    out.push_str("        chart: {\n");
    for n in 1..=5 {
        let _ = writeln!(out, "          \"{n}\": {},", hsl_var(&format!("chart-{n}")));
    }
    out.push_str("        },\n        sidebar: {\n");
    for (name, key) in SIDEBAR_COLORS {
        let _ = writeln!(out, "          {}: {},", js_key(name), hsl_var(key));
    }
    out.push_str("        },\n      },\n");

    out.push_str("      fontFamily: {\n");
    for key in FONT_TOKENS {
        let families = font_family_list(styles.get(ThemeMode::Light, key).unwrap_or_default());
        let short = key.trim_start_matches("font-");
        let _ = writeln!(out, "        {short}: [{families}],");
    }
    out.push_str("      },\n");

    out.push_str("      borderRadius: {\n");
    for (size, value) in RADIUS_SCALE.iter().rev().filter(|(size, _)| *size != "xl") {
        let _ = writeln!(out, "        {size}: \"{value}\",");
    }
    out.push_str("      },\n");

    out.push_str("      boxShadow: {\n");
    for level in ShadowLevel::ALL {
        let _ = writeln!(
            out,
            "        {}: \"var(--{})\",",
            js_key(level.scale_key()),
            level.css_name()
        );
    }
    out.push_str("      },\n    },\n  },\n} satisfies Config;\n");
    out
}

/// Quote an object key unless it is a plain identifier.
fn js_key(key: &str) -> String {
    let identifier = key
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if identifier {
        key.to_string()
    } else {
        serde_json::Value::from(key).to_string()
    }
}

/// `Inter, "Noto Sans", sans-serif` → `"Inter", "Noto Sans", "sans-serif"`.
fn font_family_list(stack: &str) -> String {
    stack
        .split(',')
        .map(|family| family.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|family| !family.is_empty())
        .map(|family| serde_json::Value::from(family).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_theme_state;

    #[test]
    fn v4_emits_top_level_blocks_and_theme_inline() {
        let code = generate_theme_code(&default_theme_state(), ColorFormat::Hsl, TailwindVersion::V4);
        assert!(code.starts_with(":root {\n"));
        assert!(code.contains("\n.dark {\n"));
        assert!(code.contains("  --background: hsl(0 0% 100%);\n"));
        assert!(code.contains("@theme inline {"));
        assert!(code.contains("  --color-primary: var(--primary);\n"));
        assert!(code.contains("  --radius-xl: calc(var(--radius) + 4px);\n"));
        assert!(code.contains("  --shadow-2xl: var(--shadow-2xl);\n"));
        assert!(code.contains("  --tracking-widest: calc(var(--tracking-normal) + 0.1em);\n"));
        assert!(!code.contains("--color-shadow-color"));
        assert!(!code.contains("@layer base"));
    }

    #[test]
    fn v3_wraps_in_layer_base_with_bare_triplets() {
        let code = generate_theme_code(&default_theme_state(), ColorFormat::Hsl, TailwindVersion::V3);
        assert!(code.starts_with("@layer base {\n  :root {\n"));
        assert!(code.contains("    --background: 0 0% 100%;\n"));
        assert!(code.contains("\n  .dark {\n"));
        assert!(!code.contains("@theme inline"));
        assert!(code.trim_end().ends_with('}'));
    }

    #[test]
    fn shadows_and_tracking_are_per_mode() {
        let code = generate_theme_code(&default_theme_state(), ColorFormat::Hex, TailwindVersion::V3);
        assert_eq!(code.matches("  --shadow-md: ").count(), 2);
        assert_eq!(code.matches("  --tracking-normal: 0em;").count(), 2);
        assert_eq!(code.matches("  --spacing: ").count(), 1);
        assert!(code.contains("  --shadow-color: #000000;\n"));
        assert!(code.contains("  --shadow-x: 0;\n"));
    }

    #[test]
    fn hex_format_reaches_every_color() {
        let code = generate_theme_code(&default_theme_state(), ColorFormat::Hex, TailwindVersion::V3);
        assert!(code.contains("    --background: #ffffff;\n"));
        assert!(!code.contains("oklch("));
    }

    #[test]
    fn letter_spacing_adds_body_rule() {
        let state = default_theme_state();
        let plain = generate_theme_code(&state, ColorFormat::Hsl, TailwindVersion::V4);
        assert!(!plain.contains("letter-spacing: var(--tracking-normal)"));

        let mut spaced = state.clone();
        spaced.styles.set(ThemeMode::Light, "letter-spacing", "0.025em");
        let code = generate_theme_code(&spaced, ColorFormat::Hsl, TailwindVersion::V4);
        assert!(code.contains("body {\n    letter-spacing: var(--tracking-normal);"));
        assert!(code.contains("  --tracking-normal: 0.025em;\n"));
    }

    #[test]
    fn tailwind_config_groups_colors() {
        let config = generate_tailwind_config_code(&default_theme_state());
        assert!(config.starts_with("import type { Config } from \"tailwindcss\";"));
        assert!(config.contains("        background: \"hsl(var(--background))\",\n"));
        assert!(config.contains(
            "        primary: {\n          DEFAULT: \"hsl(var(--primary))\",\n          foreground: \"hsl(var(--primary-foreground))\",\n        },\n"
        ));
        assert!(config.contains("          \"3\": \"hsl(var(--chart-3))\",\n"));
        assert!(config.contains("          \"primary-foreground\": \"hsl(var(--sidebar-primary-foreground))\",\n"));
        assert!(config.contains("        lg: \"var(--radius)\",\n"));
        assert!(config.contains("        DEFAULT: \"var(--shadow)\",\n"));
        assert!(config.contains("        \"2xl\": \"var(--shadow-2xl)\",\n"));
        assert!(config.trim_end().ends_with("} satisfies Config;"));
    }

    #[test]
    fn font_stacks_become_string_arrays() {
        assert_eq!(
            font_family_list("Inter, \"Noto Sans\", sans-serif"),
            "\"Inter\", \"Noto Sans\", \"sans-serif\""
        );
        let config = generate_tailwind_config_code(&default_theme_state());
        assert!(config.contains("        mono: [\"ui-monospace\", \"SFMono-Regular\""));
    }

    #[test]
    fn object_keys_are_quoted_when_needed() {
        assert_eq!(js_key("DEFAULT"), "DEFAULT");
        assert_eq!(js_key("2xl"), "\"2xl\"");
        assert_eq!(js_key("primary-foreground"), "\"primary-foreground\"");
    }
}
