#![forbid(unsafe_code)]

//! Writing a theme onto a document root as CSS custom properties.
//!
//! The root is abstracted behind [`ThemeTarget`]: a `dark` class toggle and
//! an inline `style` attribute. [`StyledElement`] is the in-memory target
//! used by tests and server-side rendering.

use tinct_color::{ColorFormat, TailwindVersion, color_formatter};

use crate::shadows::get_shadow_map;
use crate::tokens::{COMMON_STYLES, ThemeEditorState, is_common_style};

/// Anything that can receive a theme.
pub trait ThemeTarget {
    /// Add or remove the `dark` class.
    fn set_dark_class(&mut self, dark: bool);

    /// Current inline `style` attribute.
    fn style_attribute(&self) -> &str;

    fn set_style_attribute(&mut self, style: String);
}

/// A detached element: one class flag and an inline style string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledElement {
    dark: bool,
    style: String,
}

impl StyledElement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_dark_class(&self) -> bool {
        self.dark
    }

    /// Value of the custom property `--name`, if declared.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.style.split(';').find_map(|decl| {
            let (key, value) = decl.split_once(':')?;
            (key.trim().strip_prefix("--")? == name).then(|| value.trim())
        })
    }

    /// Number of `--name` declarations, duplicates included.
    #[must_use]
    pub fn declaration_count(&self, name: &str) -> usize {
        self.style
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .filter(|(key, _)| key.trim().strip_prefix("--") == Some(name))
            .count()
    }
}

impl ThemeTarget for StyledElement {
    fn set_dark_class(&mut self, dark: bool) {
        self.dark = dark;
    }

    fn style_attribute(&self) -> &str {
        &self.style
    }

    fn set_style_attribute(&mut self, style: String) {
        self.style = style;
    }
}

/// Set `--key: value` on `target`, replacing any earlier declaration of the
/// same property.
pub fn apply_style_to_element<T: ThemeTarget + ?Sized>(target: &mut T, key: &str, value: &str) {
    let current = target.style_attribute();
    let mut style = String::with_capacity(current.len() + key.len() + value.len() + 5);
    for decl in current.split(';').map(str::trim).filter(|decl| !decl.is_empty()) {
        let same_property = decl
            .split_once(':')
            .is_some_and(|(name, _)| name.trim().strip_prefix("--") == Some(key));
        if !same_property {
            style.push_str(decl);
            style.push(';');
        }
    }
    style.push_str("--");
    style.push_str(key);
    style.push_str(": ");
    style.push_str(value);
    style.push(';');
    target.set_style_attribute(style);
}

/// Apply the whole state: mode class, common tokens from light, the active
/// mode's colors as HSL triplets, then the eight shadows.
pub fn apply_theme_to_element<T: ThemeTarget + ?Sized>(state: &ThemeEditorState, target: &mut T) {
    target.set_dark_class(state.current_mode.is_dark());

    for key in COMMON_STYLES {
        if let Some(value) = state.styles.light.get(*key) {
            apply_style_to_element(target, key, value);
        }
    }

    for (key, value) in state.active_styles() {
        if is_common_style(key) {
            continue;
        }
        let triplet = color_formatter(value, ColorFormat::Hsl, TailwindVersion::V3);
        apply_style_to_element(target, key, &triplet);
    }

    for (level, shadow) in get_shadow_map(state).iter() {
        apply_style_to_element(target, level.css_name(), shadow);
    }

    tracing::debug!(mode = %state.current_mode, "theme applied");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_theme_state;
    use crate::tokens::ThemeMode;

    #[test]
    fn repeated_writes_replace_the_declaration() {
        let mut el = StyledElement::new();
        apply_style_to_element(&mut el, "primary", "0 0% 0%");
        apply_style_to_element(&mut el, "primary", "0 0% 100%");
        assert_eq!(el.declaration_count("primary"), 1);
        assert_eq!(el.property("primary"), Some("0 0% 100%"));
    }

    #[test]
    fn replacement_matches_the_exact_name() {
        let mut el = StyledElement::new();
        apply_style_to_element(&mut el, "primary-foreground", "white");
        apply_style_to_element(&mut el, "sidebar-primary", "blue");
        apply_style_to_element(&mut el, "primary", "black");
        apply_style_to_element(&mut el, "primary", "red");
        assert_eq!(el.property("primary-foreground"), Some("white"));
        assert_eq!(el.property("sidebar-primary"), Some("blue"));
        assert_eq!(el.property("primary"), Some("red"));
        assert_eq!(el.declaration_count("primary"), 1);
    }

    #[test]
    fn many_writes_keep_one_declaration_per_property() {
        let mut el = StyledElement::new();
        for round in 0..200 {
            for key in ["radius", "shadow", "shadow-sm"] {
                apply_style_to_element(&mut el, key, &format!("{round}px"));
            }
        }
        assert_eq!(el.declaration_count("radius"), 1);
        assert_eq!(el.declaration_count("shadow"), 1);
        assert_eq!(el.property("shadow-sm"), Some("199px"));
        assert_eq!(
            el.style_attribute(),
            "--radius: 199px;--shadow: 199px;--shadow-sm: 199px;"
        );
    }

    #[test]
    fn unrelated_inline_styles_survive() {
        let mut el = StyledElement::new();
        el.set_style_attribute("color-scheme: dark;".to_string());
        apply_style_to_element(&mut el, "radius", "1rem");
        assert!(el.style_attribute().starts_with("color-scheme: dark;"));
        assert_eq!(el.property("radius"), Some("1rem"));
    }

    #[test]
    fn theme_application_writes_every_property() {
        let state = default_theme_state();
        let mut el = StyledElement::new();
        apply_theme_to_element(&state, &mut el);

        assert!(!el.has_dark_class());
        assert_eq!(el.property("background"), Some("0 0% 100%"));
        assert_eq!(el.property("radius"), Some("0.625rem"));
        assert!(el.property("shadow-2xl").is_some());
        assert!(el.property("shadow").is_some());

        // Applying twice must not accumulate declarations.
        apply_theme_to_element(&state, &mut el);
        assert_eq!(el.declaration_count("background"), 1);
        assert_eq!(el.declaration_count("shadow-md"), 1);
    }

    #[test]
    fn dark_mode_uses_dark_colors_and_light_common_tokens() {
        let mut state = default_theme_state().with_mode(ThemeMode::Dark);
        state.styles.light.insert("radius".into(), "0.75rem".into());
        state.styles.dark.insert("radius".into(), "9rem".into());
        state.styles.dark.insert("background".into(), "#000000".into());

        let mut el = StyledElement::new();
        apply_theme_to_element(&state, &mut el);
        assert!(el.has_dark_class());
        assert_eq!(el.property("background"), Some("0 0% 0%"));
        assert_eq!(el.property("radius"), Some("0.75rem"));

        apply_theme_to_element(&state.clone().with_mode(ThemeMode::Light), &mut el);
        assert!(!el.has_dark_class());
        assert_eq!(el.property("background"), Some("0 0% 100%"));
    }
}
