//! Label-bounded multi-line block extraction.

use super::Extraction;

/// Scan `lines` for the block that follows the first line containing any of
/// `start_labels`, up to (not including) the first line containing any of
/// `end_labels`.
///
/// Matching is case-insensitive and unanchored. Without an end line the
/// block runs to the end of input. Blank lines are dropped and the rest are
/// trimmed and joined with `\n`. Empty labels are ignored on both sides, so
/// a start list with no non-empty label never matches.
pub fn find_block<S, E, L>(start_labels: &[S], end_labels: &[E], lines: &[L]) -> Extraction
where
    S: AsRef<str>,
    E: AsRef<str>,
    L: AsRef<str>,
{
    let starts = lowercase_all(start_labels);
    let ends = lowercase_all(end_labels);

    let Some(start) = lines
        .iter()
        .position(|line| contains_any(line.as_ref(), &starts))
    else {
        return Extraction::NotFound;
    };

    let block: Vec<&str> = lines[start + 1..]
        .iter()
        .map(|line| line.as_ref())
        .take_while(|line| !contains_any(line, &ends))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    Extraction::from_capture(&block.join("\n"))
}

/// Extract the block following `start_label`; empty string when absent.
///
/// An empty `start_label` matches nothing and yields the empty string.
pub fn extract_block<E, L>(start_label: &str, end_labels: &[E], lines: &[L]) -> String
where
    E: AsRef<str>,
    L: AsRef<str>,
{
    find_block(&[start_label], end_labels, lines).value_or("")
}

fn lowercase_all<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels
        .iter()
        .map(|label| label.as_ref().to_lowercase())
        .filter(|label| !label.is_empty())
        .collect()
}

fn contains_any(line: &str, labels: &[String]) -> bool {
    if labels.is_empty() {
        return false;
    }
    let line = line.to_lowercase();
    labels.iter().any(|label| line.contains(label.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_organisation_block() {
        let lines = ["Organisation Details", "  Dept of X  ", "", "Buyer Details", "Name: Y"];
        assert_eq!(
            extract_block("Organisation Details", &["Buyer Details"], &lines),
            "Dept of X"
        );
    }

    #[test]
    fn test_missing_start_label() {
        let lines = ["Buyer Details", "Name: Y"];
        assert_eq!(extract_block("Organisation Details", &["Buyer Details"], &lines), "");
        assert_eq!(
            find_block(&["Organisation Details"], &["Buyer Details"], &lines),
            Extraction::NotFound
        );
    }

    #[test]
    fn test_unterminated_block_runs_to_end() {
        let lines = ["header", "Buyer Details", " Name: Y ", "", "  Office: Z", "   "];
        assert_eq!(
            extract_block("buyer details", &["Seller Details"], &lines),
            "Name: Y\nOffice: Z"
        );
    }

    #[test]
    fn test_first_end_label_wins() {
        let lines = [
            "Buyer Details",
            "Designation : Engineer",
            "Email ID : a@b.in",
            "Seller Details",
            "Product Details",
        ];
        let ends = ["Product Details", "Email ID", "Seller Details"];
        assert_eq!(extract_block("Buyer Details", &ends, &lines), "Designation : Engineer");
    }

    #[test]
    fn test_start_line_is_excluded_and_matched_unanchored() {
        let lines = ["1. ORGANISATION DETAILS / संगठन विवरण", "Ministry : Power", "Buyer Details"];
        assert_eq!(
            extract_block("Organisation Details", &["buyer details"], &lines),
            "Ministry : Power"
        );
    }

    #[test]
    fn test_start_aliases() {
        let lines = ["संगठन विवरण", "Ministry : Power", "क्रेता विवरण"];
        let block = find_block(
            &["Organisation Details", "संगठन विवरण"],
            &["Buyer Details", "क्रेता विवरण"],
            &lines,
        );
        assert_eq!(block, Extraction::Found("Ministry : Power".to_string()));
    }

    #[test]
    fn test_start_found_but_block_empty() {
        let lines = ["Organisation Details", "", "Buyer Details"];
        assert_eq!(
            find_block(&["Organisation Details"], &["Buyer Details"], &lines),
            Extraction::Empty
        );
    }

    #[test]
    fn test_no_end_labels() {
        let lines = ["Product Details", "Brand : Syska", "Model : X1"];
        let ends: [&str; 0] = [];
        assert_eq!(
            extract_block("Product Details", &ends, &lines),
            "Brand : Syska\nModel : X1"
        );
    }

    #[test]
    fn test_empty_start_label_matches_nothing() {
        let lines = ["Organisation Details", "Dept of X", "Buyer Details"];

        assert_eq!(extract_block("", &["Buyer Details"], &lines), "");
        assert_eq!(find_block(&[""], &["Buyer Details"], &lines), Extraction::NotFound);
    }
}
