#![forbid(unsafe_code)]

//! Tinct public facade crate.
//!
//! This crate provides the stable surface area for users. It re-exports
//! common types from the internal crates and offers a lightweight prelude
//! for day-to-day usage.

use std::fmt;

// --- Color re-exports ------------------------------------------------------

pub use tinct_color::{
    ColorFormat, ColorParseError, ContrastLevel, HslAdjustments, TailwindVersion,
    adjust_color_by_hsl, color_formatter, get_contrast_ratio,
};

// --- Theme re-exports ------------------------------------------------------

pub use tinct_theme::{
    ImportError, ParsedCss, PresetError, PresetRegistry, ShadowMap, StyledElement,
    ThemeEditorState, ThemeMode, ThemePreset, ThemeStyleProps, ThemeStyles, ThemeTarget,
    apply_style_to_element, apply_theme_to_element, contrast_report, default_theme_state,
    generate_tailwind_config_code, generate_theme_code, get_preset_theme_styles, get_shadow_map,
    parse_css_input,
};

// --- Editor re-exports -----------------------------------------------------

#[cfg(feature = "editor")]
pub use tinct_editor::{
    ConfigError, EditorConfig, EmbedAction, EmbedMessage, EmbedOrigin, EmbedSession, EmbedStatus,
    ProtocolError, SetOutcome, ThemeEditor,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Tinct hosts.
#[derive(Debug)]
pub enum Error {
    /// A color string could not be read.
    Color(ColorParseError),
    /// Pasted CSS was rejected.
    Import(ImportError),
    /// A preset could not be found, saved or decoded.
    Preset(PresetError),
    /// The editor configuration could not be loaded.
    #[cfg(feature = "editor")]
    Config(ConfigError),
    /// An embed message could not be decoded.
    #[cfg(feature = "editor")]
    Protocol(ProtocolError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "{err}"),
            Self::Preset(err) => write!(f, "{err}"),
            #[cfg(feature = "editor")]
            Self::Config(err) => write!(f, "{err}"),
            #[cfg(feature = "editor")]
            Self::Protocol(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Color(err) => Some(err),
            Self::Import(err) => Some(err),
            Self::Preset(err) => Some(err),
            #[cfg(feature = "editor")]
            Self::Config(err) => Some(err),
            #[cfg(feature = "editor")]
            Self::Protocol(err) => Some(err),
        }
    }
}

impl From<ColorParseError> for Error {
    fn from(err: ColorParseError) -> Self {
        Self::Color(err)
    }
}

impl From<ImportError> for Error {
    fn from(err: ImportError) -> Self {
        Self::Import(err)
    }
}

impl From<PresetError> for Error {
    fn from(err: PresetError) -> Self {
        Self::Preset(err)
    }
}

#[cfg(feature = "editor")]
impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(feature = "editor")]
impl From<ProtocolError> for Error {
    fn from(err: ProtocolError) -> Self {
        Self::Protocol(err)
    }
}

/// Standard result type for Tinct APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ColorFormat, Error, HslAdjustments, Result, StyledElement, TailwindVersion,
        ThemeEditorState, ThemeMode, ThemeTarget,
    };

    #[cfg(feature = "editor")]
    pub use crate::{EditorConfig, EmbedSession, ThemeEditor};

    pub use crate::{color, theme};

    #[cfg(feature = "editor")]
    pub use crate::editor;
}

pub use tinct_color as color;
#[cfg(feature = "editor")]
pub use tinct_editor as editor;
pub use tinct_theme as theme;
