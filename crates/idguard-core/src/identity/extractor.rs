//! Identity field extractor combining the per-field rules.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::models::config::ExtractionConfig;
use crate::models::document::{ExtractedFields, FieldKind, FieldValue};

use super::classifier::DocumentClassifier;
use super::rules::{
    DateOfBirthExtractor, ExtractionMatch, FieldExtractor, GenderExtractor, IdNumberExtractor,
    NameExtractor, Vocabulary,
};

/// Runs every field rule over a transcript and classifies the document.
///
/// Fields are independent: a missing field never prevents the others from
/// being extracted, and nothing here can fail.
#[derive(Debug, Clone)]
pub struct IdentityExtractor {
    id_number: IdNumberExtractor,
    name: NameExtractor,
    date_of_birth: DateOfBirthExtractor,
    gender: GenderExtractor,
    classifier: DocumentClassifier,
}

impl IdentityExtractor {
    /// Create an extractor with the default vocabulary.
    pub fn new() -> Self {
        Self::with_vocabulary(Vocabulary::shared_default())
    }

    /// Create an extractor whose rules share `vocabulary`.
    pub fn with_vocabulary(vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            id_number: IdNumberExtractor::new(),
            name: NameExtractor::with_vocabulary(Arc::clone(&vocabulary)),
            date_of_birth: DateOfBirthExtractor::new(),
            gender: GenderExtractor::new(),
            classifier: DocumentClassifier::with_vocabulary(vocabulary),
        }
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        let vocabulary = Vocabulary::from_config(config)?;
        Ok(Self::with_vocabulary(Arc::new(vocabulary)))
    }

    /// Extract every field from `text`.
    pub fn extract(&self, text: &str) -> ExtractedFields {
        let mut field_confidence = BTreeMap::new();

        let id_number = self.id_number.extract(text);
        let is_identity_document = self.classifier.classify_with_id(text, id_number.is_some());

        let id_number = settle(FieldKind::IdNumber, id_number, &mut field_confidence);
        let name = settle(FieldKind::Name, self.name.extract(text), &mut field_confidence);
        let date_of_birth = settle(
            FieldKind::DateOfBirth,
            self.date_of_birth.extract(text),
            &mut field_confidence,
        );
        let gender = settle(FieldKind::Gender, self.gender.extract(text), &mut field_confidence);

        debug!(
            chars = text.chars().count(),
            found = field_confidence.len(),
            is_identity_document,
            "extracted identity fields"
        );

        ExtractedFields {
            id_number,
            name,
            date_of_birth,
            gender,
            is_identity_document,
            field_confidence,
        }
    }
}

impl Default for IdentityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a rule outcome into a field value, recording its confidence.
fn settle(
    kind: FieldKind,
    found: Option<ExtractionMatch<String>>,
    confidence: &mut BTreeMap<FieldKind, f32>,
) -> FieldValue {
    let value = FieldValue::from_option(found.as_ref().map(|m| m.value.clone()));
    match (&value, found) {
        (FieldValue::Found(_), Some(m)) => {
            debug!(field = ?kind, confidence = m.confidence, "field found");
            confidence.insert(kind, m.confidence);
        }
        _ => debug!(field = ?kind, "field not found"),
    }
    value
}

/// Extract identity fields with the default vocabulary.
pub fn extract_fields(text: &str) -> ExtractedFields {
    IdentityExtractor::new().extract(text)
}
