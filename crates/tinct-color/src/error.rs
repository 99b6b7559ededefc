#![forbid(unsafe_code)]

use thiserror::Error;

/// Why a CSS color string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color value")]
    Empty,

    #[error("invalid hex color: {value}")]
    InvalidHex { value: String },

    #[error("unsupported color function: {name}()")]
    UnsupportedFunction { name: String },

    #[error("{function}() expects 3 channels and an optional alpha, got {count}")]
    Arity { function: &'static str, count: usize },

    #[error("invalid {function}() component: {component}")]
    InvalidComponent {
        function: &'static str,
        component: String,
    },

    #[error("unknown color: {value}")]
    Unknown { value: String },
}

impl ColorParseError {
    pub(crate) fn component(function: &'static str, component: &str) -> Self {
        Self::InvalidComponent {
            function,
            component: component.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ColorParseError;

    #[test]
    fn arity_message_names_the_function() {
        let err = ColorParseError::Arity {
            function: "rgb",
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "rgb() expects 3 channels and an optional alpha, got 2"
        );
    }

    #[test]
    fn component_constructor_copies_text() {
        let err = ColorParseError::component("hsl", "abc%");
        assert_eq!(err.to_string(), "invalid hsl() component: abc%");
    }
}
