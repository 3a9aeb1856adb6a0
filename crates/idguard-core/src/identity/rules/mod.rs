//! Rule-based field extractors for identity document transcripts.

pub mod date_of_birth;
pub mod gender;
pub mod id_number;
pub mod name;
pub mod patterns;
pub mod vocabulary;

pub use date_of_birth::{extract_date_of_birth, DateOfBirthExtractor};
pub use gender::{extract_gender, normalize_gender, GenderExtractor};
pub use id_number::{extract_id_number, normalize_id_number, IdNumberExtractor};
pub use name::{extract_name, NameExtractor, NameStage};
pub use vocabulary::Vocabulary;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Byte range in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Build a match from a regex match, recording its span.
    pub fn from_regex(value: T, confidence: f32, m: regex::Match<'_>) -> Self {
        Self::new(value, confidence, m.as_str()).with_position(m.start(), m.end())
    }
}

/// Upper-case the first character and lower-case the rest.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect::<String>(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("FEMALE"), "Female");
        assert_eq!(capitalize("m"), "M");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_match_position() {
        let m = patterns::DATE_OF_BIRTH.find("DOB 01/02/1990").unwrap();
        let found = ExtractionMatch::from_regex(m.as_str().to_string(), 0.8, m);
        assert_eq!(found.position, Some((4, 14)));
        assert_eq!(found.source, "01/02/1990");
    }
}
