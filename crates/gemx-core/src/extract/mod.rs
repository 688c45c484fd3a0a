//! Field and block extraction primitives.

mod block;
mod field;

pub use block::{extract_block, find_block};
pub use field::{compile_pattern, extract_field, find_field};

use serde::{Deserialize, Serialize};

/// Outcome of a single extraction attempt.
///
/// Distinguishes a value that is blank in the source from a label that
/// was never recognized, which a plain empty string cannot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Label matched and produced a non-empty value.
    Found(String),
    /// Label matched but the captured value is blank.
    Empty,
    /// Label was not recognized anywhere in the text.
    NotFound,
}

impl Extraction {
    /// Build from a captured value, treating blank text as `Empty`.
    pub fn from_capture(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Found(value.to_string())
        }
    }

    /// Whether the label was recognized.
    pub fn is_matched(&self) -> bool {
        !matches!(self, Self::NotFound)
    }

    /// The extracted value, or `default` when nothing was found.
    ///
    /// A matched-but-empty field yields an empty string, not the default.
    pub fn value_or(self, default: &str) -> String {
        match self {
            Self::Found(value) => value,
            Self::Empty => String::new(),
            Self::NotFound => default.to_string(),
        }
    }

    /// The reportable kind of this outcome.
    pub fn kind(&self) -> ExtractionKind {
        match self {
            Self::Found(_) => ExtractionKind::Found,
            Self::Empty => ExtractionKind::Empty,
            Self::NotFound => ExtractionKind::NotFound,
        }
    }
}

/// Value-free form of [`Extraction`] for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionKind {
    Found,
    Empty,
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_capture() {
        assert_eq!(Extraction::from_capture("  x "), Extraction::Found("x".to_string()));
        assert_eq!(Extraction::from_capture(" \n "), Extraction::Empty);
    }

    #[test]
    fn test_value_or() {
        assert_eq!(Extraction::Found("a".into()).value_or("d"), "a");
        assert_eq!(Extraction::Empty.value_or("d"), "");
        assert_eq!(Extraction::NotFound.value_or("d"), "d");
    }
}
