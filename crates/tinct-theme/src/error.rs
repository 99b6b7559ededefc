use thiserror::Error;

/// Errors surfaced by the preset registry.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("preset not found: {name}")]
    NotFound { name: String },

    #[error("built-in preset cannot be modified: {name}")]
    BuiltIn { name: String },

    #[error("invalid preset name: {name:?}")]
    InvalidName { name: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced when validating pasted CSS.
///
/// Its `Display` form is the single user-facing message shown next to the
/// import box.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Please enter some CSS to import")]
    Empty,

    #[error("Invalid CSS format. CSS should contain variable definitions like --primary: #color")]
    MissingVariables,
}

impl PresetError {
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    #[must_use]
    pub fn built_in(name: impl Into<String>) -> Self {
        Self::BuiltIn { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_preset() {
        assert_eq!(
            PresetError::not_found("sunset").to_string(),
            "preset not found: sunset"
        );
        assert_eq!(
            PresetError::built_in("default").to_string(),
            "built-in preset cannot be modified: default"
        );
    }

    #[test]
    fn json_errors_convert() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let preset: PresetError = err.into();
        assert!(matches!(preset, PresetError::Json(_)));
    }
}
