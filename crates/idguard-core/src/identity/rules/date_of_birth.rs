//! Date of birth extraction.
//!
//! The date is returned exactly as printed. ID cards mix `DD/MM/YYYY`,
//! `DD-MM-YYYY` and two-digit years, and the value is shown to the cardholder
//! for verification, so no calendar validation or reformatting is done.

use super::patterns::DATE_OF_BIRTH;
use super::{ExtractionMatch, FieldExtractor};

/// Date of birth field extractor.
#[derive(Debug, Clone, Default)]
pub struct DateOfBirthExtractor;

impl DateOfBirthExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for DateOfBirthExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        DATE_OF_BIRTH
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| ExtractionMatch::from_regex(m.as_str().to_string(), 0.8, m))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_OF_BIRTH
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| ExtractionMatch::from_regex(m.as_str().to_string(), 0.8, m))
            .collect()
    }
}

/// Extract the first date from text.
pub fn extract_date_of_birth(text: &str) -> Option<String> {
    DateOfBirthExtractor::new().extract(text).map(|m| m.value)
}
