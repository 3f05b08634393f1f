use serde::{Deserialize, Serialize};

/// The shape of a password to generate.
///
/// `length` is signed because it usually comes straight from user input; it is validated when a
/// password is generated, not here.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub length: i64,
    pub include_digits: bool,
    pub include_symbols: bool,
}

impl GenerationConfig {
    pub fn new(length: i64, include_digits: bool, include_symbols: bool) -> GenerationConfig {
        GenerationConfig {
            length,
            include_digits,
            include_symbols,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            length: 16,
            include_digits: true,
            include_symbols: false,
        }
    }
}

/// A generated password. Immutable once produced; its `Debug` output is redacted.
#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Password(pub(crate) String);

opaque_debug::implement!(Password);

impl Password {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in characters, which is what `GenerationConfig::length` counts.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
