//! Gender extraction.

use super::patterns::{GENDER_LABELED, GENDER_STANDALONE};
use super::{capitalize, ExtractionMatch, FieldExtractor};

/// Gender field extractor.
#[derive(Debug, Clone, Default)]
pub struct GenderExtractor;

impl GenderExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for GenderExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        // "Gender:"/"Sex:" label first, then any standalone value.
        if let Some(m) = GENDER_LABELED.captures(text).and_then(|caps| caps.get(1)) {
            return Some(ExtractionMatch::from_regex(normalize_gender(m.as_str()), 0.95, m));
        }

        GENDER_STANDALONE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| ExtractionMatch::from_regex(normalize_gender(m.as_str()), 0.6, m))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = GENDER_LABELED
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| ExtractionMatch::from_regex(normalize_gender(m.as_str()), 0.95, m))
            .collect();

        for m in GENDER_STANDALONE
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
        {
            // Skip values already covered by a labeled match
            if results.iter().any(|r| r.position == Some((m.start(), m.end()))) {
                continue;
            }
            results.push(ExtractionMatch::from_regex(normalize_gender(m.as_str()), 0.6, m));
        }

        results
    }
}

/// Extract gender from text.
pub fn extract_gender(text: &str) -> Option<String> {
    GenderExtractor::new().extract(text).map(|m| m.value)
}

/// Normalize a gender token: first letter upper, rest lower.
pub fn normalize_gender(value: &str) -> String {
    capitalize(value)
}
