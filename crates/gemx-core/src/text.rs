//! Cell value normalization.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CONTROL_RUN: Regex = Regex::new(r"[\x00-\x1F]+").unwrap();
}

/// Replace every run of ASCII control characters with one space and trim.
///
/// PDF text layers routinely carry form feeds, vertical tabs and NULs that
/// spreadsheet writers reject, so every value goes through this before it
/// leaves the batch.
pub fn normalize(value: &str) -> String {
    CONTROL_RUN.replace_all(value, " ").trim().to_string()
}
