#![forbid(unsafe_code)]

//! Best-effort import of pasted CSS variables.
//!
//! The importer reads the first `:root { ... }` block as light and the first
//! `.dark { ... }` block as dark, then every `--name: value;` declaration
//! inside them. Unknown names are skipped. Non-color tokens keep their value
//! verbatim. Color values are normalized to hex; a value starting with a
//! digit is read as a bare Tailwind v3 HSL triplet.
//!
//! Malformed input never fails: it yields whatever declarations could be
//! recognized, possibly none. [`validate_css_input`] is the only check that
//! reports an error, and it is deliberately shallow.

use std::sync::LazyLock;

use regex_lite::Regex;
use tinct_color::{ColorFormat, TailwindVersion, color_formatter};

use crate::error::ImportError;
use crate::tokens::{ThemeStyleProps, ThemeStyles, is_color_token, is_known_token};

static ROOT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":root\s*\{([^}]+)\}").expect("root block regex"));
static DARK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.dark\s*\{([^}]+)\}").expect("dark block regex"));
static DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--([^:]+):\s*([^;]+);").expect("declaration regex"));

/// Tokens recovered from both blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedCss {
    pub light_colors: ThemeStyleProps,
    pub dark_colors: ThemeStyleProps,
}

impl ParsedCss {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.light_colors.is_empty() && self.dark_colors.is_empty()
    }
}

/// Shallow check that the text looks like CSS variable definitions.
pub fn validate_css_input(css: &str) -> Result<(), ImportError> {
    let css = css.trim();
    if css.is_empty() {
        return Err(ImportError::Empty);
    }
    if !css.contains("--") || !css.contains(':') {
        return Err(ImportError::MissingVariables);
    }
    Ok(())
}

#[must_use]
pub fn parse_css_input(css: &str) -> ParsedCss {
    let block = |re: &Regex| {
        re.captures(css)
            .and_then(|caps| caps.get(1))
            .map(|m| parse_declarations(m.as_str()))
            .unwrap_or_default()
    };
    let parsed = ParsedCss {
        light_colors: block(&ROOT_BLOCK),
        dark_colors: block(&DARK_BLOCK),
    };
    tracing::debug!(
        light = parsed.light_colors.len(),
        dark = parsed.dark_colors.len(),
        "css import parsed"
    );
    parsed
}

fn parse_declarations(block: &str) -> ThemeStyleProps {
    let mut props = ThemeStyleProps::new();
    for caps in DECLARATION.captures_iter(block) {
        let (Some(name), Some(value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let name = name.as_str().trim();
        let value = value.as_str().trim();
        if !is_known_token(name) {
            tracing::debug!(token = %name, "skipping unknown css variable");
            continue;
        }
        let value = if is_color_token(name) {
            normalize_color(value)
        } else {
            value.to_string()
        };
        props.insert(name.to_string(), value);
    }
    props
}

fn normalize_color(value: &str) -> String {
    let wrapped = if value.starts_with(|c: char| c.is_ascii_digit()) {
        format!("hsl({value})")
    } else {
        value.to_string()
    };
    color_formatter(&wrapped, ColorFormat::Hex, TailwindVersion::V4)
}

/// Overlay imported tokens onto `base`. Common tokens follow the light
/// block.
#[must_use]
pub fn import_into_styles(parsed: &ParsedCss, base: &ThemeStyles) -> ThemeStyles {
    let mut styles = base.clone();
    styles.light.extend(
        parsed
            .light_colors
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    styles.dark.extend(
        parsed
            .dark_colors
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    styles.mirror_common_styles();
    styles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_theme_styles;

    #[test]
    fn bare_triplets_become_hex() {
        let parsed = parse_css_input(":root{--primary:0 0% 0%;} .dark{--primary:0 0% 100%;}");
        assert_eq!(parsed.light_colors["primary"], "#000000");
        assert_eq!(parsed.dark_colors["primary"], "#ffffff");
    }

    #[test]
    fn function_colors_are_normalized() {
        let css = r"
            :root {
              --background: oklch(1 0 0);
              --ring: hsl(0 100% 50%);
              --accent: #ABCDEF;
            }
        ";
        let parsed = parse_css_input(css);
        assert_eq!(parsed.light_colors["background"], "#ffffff");
        assert_eq!(parsed.light_colors["ring"], "#ff0000");
        assert_eq!(parsed.light_colors["accent"], "#abcdef");
        assert!(parsed.dark_colors.is_empty());
    }

    #[test]
    fn non_colors_are_verbatim_and_unknowns_skipped() {
        let css = ":root { --radius: 0.5rem; --font-sans: Inter, sans-serif; --brand: #fff; --shadow-offset-y: 2px; }";
        let parsed = parse_css_input(css);
        assert_eq!(parsed.light_colors["radius"], "0.5rem");
        assert_eq!(parsed.light_colors["font-sans"], "Inter, sans-serif");
        assert_eq!(parsed.light_colors["shadow-offset-y"], "2px");
        assert!(!parsed.light_colors.contains_key("brand"));
    }

    #[test]
    fn unparseable_colors_pass_through() {
        let parsed = parse_css_input(":root { --primary: var(--brand); }");
        assert_eq!(parsed.light_colors["primary"], "var(--brand)");
    }

    #[test]
    fn malformed_css_yields_nothing() {
        assert!(parse_css_input("body { color: red }").is_empty());
        assert!(parse_css_input(":root { --primary: #000 ").is_empty());
        assert!(parse_css_input("").is_empty());
    }

    #[test]
    fn validation_is_shallow() {
        assert_eq!(validate_css_input("   "), Err(ImportError::Empty));
        assert_eq!(
            validate_css_input("body { color: red }"),
            Err(ImportError::MissingVariables)
        );
        assert_eq!(validate_css_input("--primary #000"), Err(ImportError::MissingVariables));
        assert_eq!(validate_css_input("--primary: #000;"), Ok(()));
    }

    #[test]
    fn import_overlays_and_mirrors_common_tokens() {
        let parsed = parse_css_input(
            ":root { --primary: #111111; --radius: 1rem; } .dark { --primary: #eeeeee; }",
        );
        let base = default_theme_styles();
        let styles = import_into_styles(&parsed, &base);
        assert_eq!(styles.light["primary"], "#111111");
        assert_eq!(styles.dark["primary"], "#eeeeee");
        assert_eq!(styles.dark["radius"], "1rem");
        assert_eq!(styles.light["background"], base.light["background"]);
    }
}
