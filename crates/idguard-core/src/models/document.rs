//! Identity document data models: extracted fields, redaction summaries and
//! the combined scan report.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Text shown for a field that could not be extracted.
pub const NOT_FOUND_LABEL: &str = "Not found";

/// Semantic category of an extracted identity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// 12-digit national ID number.
    IdNumber,
    /// Cardholder name.
    Name,
    /// Date of birth, verbatim.
    DateOfBirth,
    /// Gender, capitalized.
    Gender,
}

impl FieldKind {
    /// All field kinds in presentation order.
    pub const ALL: [FieldKind; 4] = [
        FieldKind::IdNumber,
        FieldKind::Name,
        FieldKind::DateOfBirth,
        FieldKind::Gender,
    ];

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::IdNumber => "Aadhaar Number",
            FieldKind::Name => "Full Name",
            FieldKind::DateOfBirth => "Date of Birth",
            FieldKind::Gender => "Gender",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of extracting one field: a non-empty normalized value or the
/// `NotFound` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "value")]
pub enum FieldValue {
    Found(String),
    NotFound,
}

impl FieldValue {
    /// Build a value, treating blank strings as not found.
    pub fn from_option(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => FieldValue::Found(v),
            _ => FieldValue::NotFound,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FieldValue::Found(_))
    }

    /// Borrow the value if found.
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            FieldValue::Found(v) => Some(v),
            FieldValue::NotFound => None,
        }
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        Self::from_option(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Found(v) => f.write_str(v),
            FieldValue::NotFound => f.write_str(NOT_FOUND_LABEL),
        }
    }
}

/// Fields extracted from one OCR transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// ID number in `dddd dddd dddd` form.
    pub id_number: FieldValue,

    /// Cardholder name.
    pub name: FieldValue,

    /// Date of birth as written on the document.
    pub date_of_birth: FieldValue,

    /// Gender, first letter upper case.
    pub gender: FieldValue,

    /// Whether the transcript plausibly comes from a national ID card.
    pub is_identity_document: bool,

    /// Confidence of the rule that produced each found field (0.0 - 1.0).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_confidence: BTreeMap<FieldKind, f32>,
}

impl ExtractedFields {
    /// Fields with every value `NotFound`.
    pub fn empty() -> Self {
        Self {
            id_number: FieldValue::NotFound,
            name: FieldValue::NotFound,
            date_of_birth: FieldValue::NotFound,
            gender: FieldValue::NotFound,
            is_identity_document: false,
            field_confidence: BTreeMap::new(),
        }
    }

    /// Look up a field by kind.
    pub fn get(&self, kind: FieldKind) -> &FieldValue {
        match kind {
            FieldKind::IdNumber => &self.id_number,
            FieldKind::Name => &self.name,
            FieldKind::DateOfBirth => &self.date_of_birth,
            FieldKind::Gender => &self.gender,
        }
    }

    /// Iterate fields in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKind, &FieldValue)> {
        FieldKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Kinds that were not found.
    pub fn missing(&self) -> Vec<FieldKind> {
        self.iter()
            .filter(|(_, value)| !value.is_found())
            .map(|(kind, _)| kind)
            .collect()
    }
}

/// Category of a redacted PII span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiCategory {
    IdNumber,
    Phone,
    Email,
    Date,
    NameLabeled,
    AddressLabeled,
}

impl PiiCategory {
    /// All categories in masking order.
    pub const ALL: [PiiCategory; 6] = [
        PiiCategory::IdNumber,
        PiiCategory::Phone,
        PiiCategory::Email,
        PiiCategory::Date,
        PiiCategory::NameLabeled,
        PiiCategory::AddressLabeled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PiiCategory::IdNumber => "id_number",
            PiiCategory::Phone => "phone",
            PiiCategory::Email => "email",
            PiiCategory::Date => "date",
            PiiCategory::NameLabeled => "name_labeled",
            PiiCategory::AddressLabeled => "address_labeled",
        }
    }
}

impl fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of spans redacted per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedactionSummary {
    counts: BTreeMap<PiiCategory, usize>,
}

impl RedactionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` redactions of `category`. Zero counts are not stored.
    pub fn record(&mut self, category: PiiCategory, count: usize) {
        if count > 0 {
            *self.counts.entry(category).or_insert(0) += count;
        }
    }

    /// Redactions of one category.
    pub fn count(&self, category: PiiCategory) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Total redactions.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PiiCategory, usize)> + '_ {
        self.counts.iter().map(|(c, n)| (*c, *n))
    }
}

/// Combined output of both pipelines for one transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Extracted identity fields and classification.
    pub fields: ExtractedFields,

    /// Transcript with every detected PII span redacted.
    pub masked_text: String,

    /// Redactions applied per category.
    pub redactions: RedactionSummary,

    /// Extraction warnings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl DocumentReport {
    /// Whether masking changed the transcript.
    pub fn was_masked(&self) -> bool {
        !self.redactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_value_from_blank_is_not_found() {
        assert_eq!(FieldValue::from_option(Some("  ".to_string())), FieldValue::NotFound);
        assert_eq!(FieldValue::from_option(None), FieldValue::NotFound);
        assert_eq!(
            FieldValue::from_option(Some("Male".to_string())),
            FieldValue::Found("Male".to_string())
        );
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::NotFound.to_string(), "Not found");
        assert_eq!(FieldValue::Found("F".to_string()).to_string(), "F");
    }

    #[test]
    fn test_field_value_serialization() {
        let found = serde_json::to_value(FieldValue::Found("Female".to_string())).unwrap();
        assert_eq!(found, serde_json::json!({"status": "found", "value": "Female"}));

        let missing = serde_json::to_value(FieldValue::NotFound).unwrap();
        assert_eq!(missing, serde_json::json!({"status": "not_found"}));

        let back: FieldValue = serde_json::from_value(missing).unwrap();
        assert_eq!(back, FieldValue::NotFound);
    }

    #[test]
    fn test_missing_fields() {
        let mut fields = ExtractedFields::empty();
        fields.gender = FieldValue::Found("M".to_string());

        assert_eq!(
            fields.missing(),
            vec![FieldKind::IdNumber, FieldKind::Name, FieldKind::DateOfBirth]
        );
    }

    #[test]
    fn test_redaction_summary() {
        let mut summary = RedactionSummary::new();
        summary.record(PiiCategory::Email, 1);
        summary.record(PiiCategory::Phone, 0);
        summary.record(PiiCategory::Email, 2);

        assert_eq!(summary.count(PiiCategory::Email), 3);
        assert_eq!(summary.count(PiiCategory::Phone), 0);
        assert_eq!(summary.total(), 3);
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            serde_json::json!({"email": 3})
        );
    }
}
