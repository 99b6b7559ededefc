#![forbid(unsafe_code)]

//! Editor configuration as data.
//!
//! Every tunable of the editor lives in one [`EditorConfig`] that can be
//! loaded from TOML or JSON at startup. Missing fields take their defaults,
//! so a file only needs to name what it changes.
//!
//! ```toml
//! # tinct.toml
//! [history]
//! max_entries = 50
//!
//! [output]
//! color_format = "oklch"
//! tailwind_version = "3"
//! ```
//!
//! ```rust,ignore
//! let config = EditorConfig::load_validated("tinct.toml")?;
//! let mut editor = ThemeEditor::with_config(config);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tinct_color::{ColorFormat, TailwindVersion};
use web_time::Duration;

use crate::error::ConfigError;
use crate::history::HistoryConfig;

/// Upper bound on history depth accepted by [`EditorConfig::validate`].
pub const MAX_HISTORY_ENTRIES: usize = 1000;
/// Slider commit delays outside this range feel broken.
pub const DEBOUNCE_RANGE_MS: std::ops::RangeInclusive<u64> = 10..=750;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Undo depth and coalescing.
    pub history: HistoryConfig,

    /// Preview iframe handshake.
    pub embed: EmbedConfig,

    /// Generated code defaults.
    pub output: OutputConfig,
}

impl EditorConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load a file by extension (`.json` is JSON, anything else TOML) and
    /// reject it unless [`validate`](Self::validate) comes back empty.
    pub fn load_validated(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_file(path)?
        } else {
            Self::from_toml_file(path)?
        };
        let errors = config.validate();
        if !errors.is_empty() {
            tracing::warn!(path = %path.display(), count = errors.len(), "rejected editor config");
            return Err(ConfigError::Validation(errors));
        }
        tracing::info!(
            path = %path.display(),
            max_entries = config.history.max_entries,
            color_format = %config.output.color_format,
            tailwind_version = %config.output.tailwind_version,
            "loaded editor config"
        );
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.history.max_entries == 0 {
            errors.push("history.max_entries must be > 0".into());
        }
        if self.history.max_entries > MAX_HISTORY_ENTRIES {
            errors.push(format!(
                "history.max_entries must be <= {MAX_HISTORY_ENTRIES}, got {}",
                self.history.max_entries
            ));
        }
        if self.history.coalesce_window_ms > 60_000 {
            errors.push(format!(
                "history.coalesce_window_ms must be <= 60000, got {}",
                self.history.coalesce_window_ms
            ));
        }

        if self.embed.handshake_timeout_ms == 0 {
            errors.push("embed.handshake_timeout_ms must be > 0".into());
        }
        if !DEBOUNCE_RANGE_MS.contains(&self.embed.post_debounce_ms) {
            errors.push(format!(
                "embed.post_debounce_ms must be in [{}, {}], got {}",
                DEBOUNCE_RANGE_MS.start(),
                DEBOUNCE_RANGE_MS.end(),
                self.embed.post_debounce_ms
            ));
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Preview iframe handshake parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// How long to wait for `PONG` before reporting the script missing.
    pub handshake_timeout_ms: u64,
    /// Delay before a cross-origin `THEME_UPDATE` is posted.
    pub post_debounce_ms: u64,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            handshake_timeout_ms: 3000,
            post_debounce_ms: 50,
        }
    }
}

impl EmbedConfig {
    #[must_use]
    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_millis(self.handshake_timeout_ms)
    }

    #[must_use]
    pub fn post_debounce(&self) -> Duration {
        Duration::from_millis(self.post_debounce_ms)
    }
}

/// Defaults for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color_format: ColorFormat,
    pub tailwind_version: TailwindVersion,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn default_matches_component_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.history.max_entries, 30);
        assert_eq!(config.history.coalesce_window_ms, 500);
        assert_eq!(config.embed.handshake_timeout(), Duration::from_secs(3));
        assert_eq!(config.embed.post_debounce(), Duration::from_millis(50));
        assert_eq!(config.output.color_format, ColorFormat::Hsl);
        assert_eq!(config.output.tailwind_version, TailwindVersion::V4);
    }

    #[test]
    fn default_validates_clean() {
        let errors = EditorConfig::default().validate();
        assert!(errors.is_empty(), "default config should validate: {errors:?}");
    }

    #[test]
    fn validate_catches_zero_history() {
        let mut config = EditorConfig::default();
        config.history.max_entries = 0;
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("history.max_entries")));
    }

    #[test]
    fn validate_catches_bad_debounce() {
        let mut config = EditorConfig::default();
        config.embed.post_debounce_ms = 5;
        let errors = config.validate();
        assert_eq!(errors, ["embed.post_debounce_ms must be in [10, 750], got 5"]);
    }

    #[test]
    fn multiple_validation_errors_collected() {
        let mut config = EditorConfig::default();
        config.history.max_entries = 5000;
        config.embed.handshake_timeout_ms = 0;
        config.embed.post_debounce_ms = 1000;
        let errors = config.validate();
        assert_eq!(errors.len(), 3, "should catch every error: {errors:?}");
    }

    #[test]
    fn partial_toml_preserves_defaults() {
        let config = EditorConfig::from_toml_str(
            r#"
            [history]
            max_entries = 50

            [output]
            color_format = "oklch"
            tailwind_version = "3"
            "#,
        )
        .unwrap();
        assert_eq!(config.history.max_entries, 50);
        assert_eq!(config.history.coalesce_window_ms, 500);
        assert_eq!(config.embed, EmbedConfig::default());
        assert_eq!(config.output.color_format, ColorFormat::Oklch);
        assert_eq!(config.output.tailwind_version, TailwindVersion::V3);
    }

    #[test]
    fn json_and_toml_agree() {
        let json = EditorConfig::from_json_str(
            r#"{"embed": {"post_debounce_ms": 120}, "output": {"color_format": "hex"}}"#,
        )
        .unwrap();
        let toml = EditorConfig::from_toml_str(
            "[embed]\npost_debounce_ms = 120\n[output]\ncolor_format = \"hex\"\n",
        )
        .unwrap();
        assert_eq!(json, toml);
    }

    #[test]
    fn toml_round_trips() {
        let mut config = EditorConfig::default();
        config.history.max_entries = 12;
        config.output.color_format = ColorFormat::Rgb;
        let text = config.to_toml_string().unwrap();
        assert_eq!(EditorConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn unknown_enum_value_is_a_parse_error() {
        let err = EditorConfig::from_toml_str("[output]\ncolor_format = \"cmyk\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn load_validated_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("tinct.toml");
        std::fs::write(&toml_path, "[history]\nmax_entries = 7\n").unwrap();
        let config = EditorConfig::load_validated(&toml_path).unwrap();
        assert_eq!(config.history.max_entries, 7);

        let json_path = dir.path().join("tinct.json");
        let mut file = std::fs::File::create(&json_path).unwrap();
        file.write_all(br#"{"history": {"coalesce_window_ms": 0}}"#)
            .unwrap();
        let config = EditorConfig::load_validated(&json_path).unwrap();
        assert_eq!(config.history.coalesce_window_ms, 0);
    }

    #[test]
    fn load_validated_rejects_invalid_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[history]\nmax_entries = 0").unwrap();
        let err = EditorConfig::load_validated(file.path()).unwrap_err();
        assert_eq!(err.to_string(), "validation errors: history.max_entries must be > 0");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EditorConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
