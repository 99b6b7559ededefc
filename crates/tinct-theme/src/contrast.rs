#![forbid(unsafe_code)]

//! WCAG checks over the standard foreground/background token pairs.

use tinct_color::{ContrastLevel, try_contrast_ratio};

use crate::tokens::{ThemeMode, ThemeStyles};

/// A text token and the surface it is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContrastPair {
    pub foreground: &'static str,
    pub background: &'static str,
}

impl ContrastPair {
    const fn new(foreground: &'static str, background: &'static str) -> Self {
        Self {
            foreground,
            background,
        }
    }
}

pub const CONTRAST_PAIRS: [ContrastPair; 11] = [
    ContrastPair::new("foreground", "background"),
    ContrastPair::new("card-foreground", "card"),
    ContrastPair::new("popover-foreground", "popover"),
    ContrastPair::new("primary-foreground", "primary"),
    ContrastPair::new("secondary-foreground", "secondary"),
    ContrastPair::new("muted-foreground", "muted"),
    ContrastPair::new("accent-foreground", "accent"),
    ContrastPair::new("destructive-foreground", "destructive"),
    ContrastPair::new("sidebar-foreground", "sidebar"),
    ContrastPair::new("sidebar-primary-foreground", "sidebar-primary"),
    ContrastPair::new("sidebar-accent-foreground", "sidebar-accent"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ContrastCheck {
    pub pair: ContrastPair,
    /// `1.0` when either color is missing or unparseable.
    pub ratio: f64,
    pub level: ContrastLevel,
}

impl ContrastCheck {
    /// Ratio at two decimals, as displayed.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{:.2}", self.ratio)
    }
}

/// Check every standard pair of one mode.
#[must_use]
pub fn contrast_report(styles: &ThemeStyles, mode: ThemeMode) -> Vec<ContrastCheck> {
    CONTRAST_PAIRS
        .iter()
        .map(|&pair| {
            let fg = styles.get(mode, pair.foreground).unwrap_or_default();
            let bg = styles.get(mode, pair.background).unwrap_or_default();
            let ratio = try_contrast_ratio(fg, bg).unwrap_or_else(|err| {
                tracing::warn!(
                    foreground = pair.foreground,
                    background = pair.background,
                    error = %err,
                    "contrast pair not checkable"
                );
                1.0
            });
            ContrastCheck {
                pair,
                ratio,
                level: ContrastLevel::from_ratio(ratio),
            }
        })
        .collect()
}
