//! Boolean-or-string flags used by sub-action entries.

use serde::{Deserialize, Serialize};

/// A flag given as a boolean or as the strings `"true"` / `"false"`.
///
/// Any other string is neither true nor false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    /// A boolean value.
    Bool(bool),
    /// A string value.
    Text(String),
}

impl Flag {
    /// Whether the flag is `true` or `"true"`.
    #[must_use]
    pub fn is_true(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Text(text) => text == "true",
        }
    }

    /// Whether the flag is `false` or `"false"`.
    #[must_use]
    pub fn is_false(&self) -> bool {
        match self {
            Self::Bool(value) => !*value,
            Self::Text(text) => text == "false",
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Flag {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Flag {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
