//! Single-value labeled field extraction.

use regex::{Regex, RegexBuilder};

use super::Extraction;

/// Compile a field pattern the way every catalog field is matched:
/// case-insensitive, optionally letting `.` cross line breaks.
pub fn compile_pattern(pattern: &str, multiline: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .dot_matches_new_line(multiline)
        .build()
}

/// Find the first match of `pattern` in `text` and report capture `group`.
///
/// Only the first match in document order is considered. A group that
/// does not participate in the match counts as an empty value.
pub fn find_field(pattern: &Regex, text: &str, group: usize) -> Extraction {
    match pattern.captures(text) {
        Some(caps) => caps
            .get(group)
            .map(|m| Extraction::from_capture(m.as_str()))
            .unwrap_or(Extraction::Empty),
        None => Extraction::NotFound,
    }
}

/// Return the trimmed capture `group` of the first match, or `default`.
pub fn extract_field(pattern: &Regex, text: &str, group: usize, default: &str) -> String {
    find_field(pattern, text, group).value_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn re(pattern: &str) -> Regex {
        compile_pattern(pattern, false).unwrap()
    }

    #[test]
    fn test_contract_number() {
        let pattern = re(r"Contract No[:\-]?\s*(GEMC-\d+)");
        let text = "GeM Contract\nContract No: GEMC-123456\nGenerated Date : 05-Jan-2024";

        assert_eq!(extract_field(&pattern, text, 1, ""), "GEMC-123456");
    }

    #[test]
    fn test_case_insensitive() {
        let pattern = re(r"Brand\s*:\s*(.+)");
        assert_eq!(extract_field(&pattern, "BRAND : Havells ", 1, ""), "Havells");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let pattern = re(r"GSTIN\s*:\s*([A-Z0-9]+)");
        let text = "GSTIN: 07AAAAA0000A1Z5\nGSTIN: 09BBBBB1111B1Z1";

        assert_eq!(extract_field(&pattern, text, 1, ""), "07AAAAA0000A1Z5");
    }

    #[test]
    fn test_default_on_absence() {
        let pattern = re(r"Email ID\s*:\s*(\S+)");
        assert_eq!(extract_field(&pattern, "no label here", 1, ""), "");
        assert_eq!(extract_field(&pattern, "no label here", 1, "n/a"), "n/a");
        assert_eq!(find_field(&pattern, "no label here", 1), Extraction::NotFound);
    }

    #[test]
    fn test_non_participating_group_is_empty() {
        let pattern = re(r"Rating(?:\s*-\s*(\d+))?");
        assert_eq!(find_field(&pattern, "Rating", 1), Extraction::Empty);
        assert_eq!(extract_field(&pattern, "Rating", 1, "x"), "");
    }

    #[test]
    fn test_idempotent() {
        let pattern = re(r"Product Name\s*:\s*(.+)");
        let text = "Product Name : LED Flood Light\nBrand : Syska";

        let first = extract_field(&pattern, text, 1, "");
        let second = extract_field(&pattern, text, 1, "");
        assert_eq!(first, second);
        assert_eq!(first, "LED Flood Light");
    }

    #[test]
    fn test_multiline_mode() {
        let text = "Address : 12 MG Road,\nSector 5, Gurgaon, Haryana-122001";
        let single = compile_pattern(r"Address\s*:\s*(.+Haryana)", false).unwrap();
        let multi = compile_pattern(r"Address\s*:\s*(.+Haryana)", true).unwrap();

        assert_eq!(find_field(&single, text, 1), Extraction::NotFound);
        assert_eq!(
            extract_field(&multi, text, 1, ""),
            "12 MG Road,\nSector 5, Gurgaon, Haryana"
        );
    }
}
