//! Redaction patterns, in the order they are applied.
//!
//! Digits and word boundaries are ASCII only.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::document::PiiCategory;

/// A PII category paired with the rule that detects it.
#[derive(Debug)]
pub struct RedactionPattern {
    pub category: PiiCategory,
    pub regex: Regex,
}

impl RedactionPattern {
    fn new(category: PiiCategory, pattern: &str) -> Self {
        Self {
            category,
            regex: Regex::new(pattern).unwrap(),
        }
    }
}

/// Punctuation some redaction pattern can match. Besides these the patterns
/// only match ASCII letters, digits and whitespace.
pub const MATCHABLE_PUNCTUATION: &str = "._%+-@,/:";

lazy_static! {
    /// Every redaction pattern, in masking order.
    pub static ref REDACTION_PATTERNS: [RedactionPattern; 6] = [
        // ID number, canonical spacing only
        RedactionPattern::new(
            PiiCategory::IdNumber,
            r"(?-u:\b)[0-9]{4}\s[0-9]{4}\s[0-9]{4}(?-u:\b)",
        ),
        // Mobile number, optional +91 prefix
        RedactionPattern::new(PiiCategory::Phone, r"(\+91[\-\s]?)?[6-9][0-9]{9}"),
        RedactionPattern::new(
            PiiCategory::Email,
            r"(?-u:\b)[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}(?-u:\b)",
        ),
        // DD-MM-YYYY or DD/MM/YYYY
        RedactionPattern::new(
            PiiCategory::Date,
            r"(?-u:\b)[0-9]{2}[\-/][0-9]{2}[\-/][0-9]{4}(?-u:\b)",
        ),
        // Labeled name or relation, up to the first non-letter
        RedactionPattern::new(
            PiiCategory::NameLabeled,
            r"(?i)(?-u:\b)(?:Name|S/O|D/O|W/O):?\s+[A-Za-z\s]+",
        ),
        RedactionPattern::new(
            PiiCategory::AddressLabeled,
            r"(?i)(?-u:\b)Address:?\s+[A-Za-z0-9,\-\s]+(?-u:\b)",
        ),
    ];
}

/// Pattern for one category.
pub fn pattern_for(category: PiiCategory) -> &'static RedactionPattern {
    let index = match category {
        PiiCategory::IdNumber => 0,
        PiiCategory::Phone => 1,
        PiiCategory::Email => 2,
        PiiCategory::Date => 3,
        PiiCategory::NameLabeled => 4,
        PiiCategory::AddressLabeled => 5,
    };
    &REDACTION_PATTERNS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_order_matches_categories() {
        let order: Vec<_> = REDACTION_PATTERNS.iter().map(|p| p.category).collect();
        assert_eq!(order, PiiCategory::ALL.to_vec());
    }

    #[test]
    fn test_id_number_requires_canonical_spacing() {
        let id = &pattern_for(PiiCategory::IdNumber).regex;
        assert!(id.is_match("1234 5678 9012"));
        assert!(!id.is_match("123456789012"));
        assert!(!id.is_match("1234-5678-9012"));
    }

    #[test]
    fn test_phone_prefix() {
        let phone = &pattern_for(PiiCategory::Phone).regex;
        assert_eq!(phone.find("call +91-9876543210").unwrap().as_str(), "+91-9876543210");
        assert_eq!(phone.find("call 5876543210"), None);
    }

    #[test]
    fn test_labeled_name_stops_at_non_letter() {
        let name = &pattern_for(PiiCategory::NameLabeled).regex;
        assert_eq!(
            name.find("S/O: Ramesh Gupta, Pune").unwrap().as_str(),
            "S/O: Ramesh Gupta"
        );
    }

    #[test]
    fn test_address_ends_on_word() {
        let address = &pattern_for(PiiCategory::AddressLabeled).regex;
        assert_eq!(
            address.find("Address: 12, MG Road, Pune - 411001.").unwrap().as_str(),
            "Address: 12, MG Road, Pune - 411001"
        );
    }

    #[test]
    fn test_non_ascii_digits_are_not_masked() {
        for pattern in REDACTION_PATTERNS.iter() {
            assert!(!pattern.regex.is_match("१२३४ ५६७८ ९०१२ ०१/०१/१९९० ९८७६५४३२१०"));
        }
    }

    #[test]
    fn test_token_characters_are_never_matched() {
        for fill in ['█', '*', '#', '●'] {
            let run = fill.to_string().repeat(12);
            let glued = format!("Name {run} Address {run}@{run}.io");
            for pattern in REDACTION_PATTERNS.iter() {
                if let Some(m) = pattern.regex.find(&glued) {
                    assert!(!m.as_str().contains(fill), "{:?} matched", pattern.category);
                }
            }
        }
    }

    #[test]
    fn test_matchable_punctuation_is_matched() {
        let samples = [
            "a.b@c.io",
            "a_b@c.io",
            "a%b@c.io",
            "a+b@c.io",
            "+91-9876543210",
            "S/O: Ravi",
            "Address: 1, Lane",
        ];
        for c in MATCHABLE_PUNCTUATION.chars() {
            let covered = samples.iter().any(|s| {
                REDACTION_PATTERNS
                    .iter()
                    .any(|p| p.regex.find_iter(s).any(|m| m.as_str().contains(c)))
            });
            assert!(covered, "{c:?} is never matched");
        }
    }
}
