//! 12-digit ID number extraction and normalization.

use super::patterns::{ID_NUMBER, ID_SEPARATOR};
use super::{ExtractionMatch, FieldExtractor};

/// ID number field extractor.
///
/// Accepts the first 4-4-4 digit run separated by spaces or hyphens (or not
/// separated at all). No checksum is applied.
#[derive(Debug, Clone, Default)]
pub struct IdNumberExtractor;

impl IdNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for IdNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        ID_NUMBER
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| ExtractionMatch::from_regex(normalize_id_number(m.as_str()), 0.9, m))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        ID_NUMBER
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| ExtractionMatch::from_regex(normalize_id_number(m.as_str()), 0.9, m))
            .collect()
    }
}

/// Extract the first ID number from text, normalized to `dddd dddd dddd`.
pub fn extract_id_number(text: &str) -> Option<String> {
    IdNumberExtractor::new().extract(text).map(|m| m.value)
}

/// Strip separators and regroup digits in blocks of four.
pub fn normalize_id_number(raw: &str) -> String {
    let digits: Vec<char> = ID_SEPARATOR.replace_all(raw, "").chars().collect();

    digits
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_canonical() {
        assert_eq!(extract_id_number("1234 5678 9012"), Some("1234 5678 9012".to_string()));
    }

    #[test]
    fn test_extract_unseparated() {
        assert_eq!(extract_id_number("123456789012"), Some("1234 5678 9012".to_string()));
    }

    #[test]
    fn test_extract_hyphenated_and_split_lead() {
        assert_eq!(
            extract_id_number("Aadhaar No: 1234-5678-9012"),
            Some("1234 5678 9012".to_string())
        );
        // OCR split after the first digit of the first group.
        assert_eq!(
            extract_id_number("4 321 8765 2109"),
            Some("4321 8765 2109".to_string())
        );
    }

    #[test]
    fn test_rejects_embedded_runs() {
        assert_eq!(extract_id_number("1234567890123"), None);
        assert_eq!(extract_id_number("1234 5678 901"), None);
        assert_eq!(extract_id_number(""), None);
    }

    #[test]
    fn test_first_match_wins() {
        let extractor = IdNumberExtractor::new();
        let text = "VID 9999 8888 7777\nAadhaar 1111 2222 3333";

        let first = extractor.extract(text).unwrap();
        assert_eq!(first.value, "9999 8888 7777");
        assert_eq!(first.position, Some((4, 18)));

        let all: Vec<_> = extractor.extract_all(text).into_iter().map(|m| m.value).collect();
        assert_eq!(all, vec!["9999 8888 7777", "1111 2222 3333"]);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_id_number("1234-5678 9012"), "1234 5678 9012");
        assert_eq!(normalize_id_number("1 234 5678 9012"), "1234 5678 9012");
    }
}
